pub mod schema;
#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::Result;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Status and raw body of an upstream HTTP response, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl UpstreamReply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// The generative API as seen by the relay and the orchestrator.
///
/// Implementations return `Ok` for every HTTP response, success or not, and
/// `Err` only when no response could be read.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Image generation (`:predict`).
    async fn predict(&self, api_key: &str, payload: &Value) -> Result<UpstreamReply>;

    /// Multimodal text generation (`:generateContent`), used to describe images.
    async fn generate_content(&self, api_key: &str, payload: &Value) -> Result<UpstreamReply>;
}

pub struct GoogleClient {
    base_url: String,
    describe_model: String,
    image_model: String,
    client: Client,
}

impl GoogleClient {
    pub fn new(config: &Config) -> Self {
        info!("Using generative API at: {}", config.base_url);
        info!(
            "Describe model: {}, image model: {}",
            config.describe_model, config.image_model
        );

        Self {
            base_url: config.base_url.clone(),
            describe_model: config.describe_model.clone(),
            image_model: config.image_model.clone(),
            client: Client::new(),
        }
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post(&self, url: String, api_key: &str, payload: &Value) -> Result<UpstreamReply> {
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!("{} answered {} with {} bytes", url, status, body.len());

        Ok(UpstreamReply { status, body })
    }
}

#[async_trait]
impl Upstream for GoogleClient {
    async fn predict(&self, api_key: &str, payload: &Value) -> Result<UpstreamReply> {
        let url = self.model_url(&self.image_model, "predict");
        self.post(url, api_key, payload).await
    }

    async fn generate_content(&self, api_key: &str, payload: &Value) -> Result<UpstreamReply> {
        let url = self.model_url(&self.describe_model, "generateContent");
        self.post(url, api_key, payload).await
    }
}
