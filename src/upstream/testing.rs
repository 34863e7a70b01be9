//! Scripted `Upstream` double that records every call.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use super::{Upstream, UpstreamReply};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Predict,
    GenerateContent,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub endpoint: Endpoint,
    pub api_key: String,
    pub payload: Value,
}

pub struct FakeUpstream {
    predict_reply: UpstreamReply,
    describe_reply: UpstreamReply,
    calls: Mutex<Vec<Call>>,
}

impl FakeUpstream {
    pub fn new(describe_reply: UpstreamReply, predict_reply: UpstreamReply) -> Self {
        Self {
            predict_reply,
            describe_reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Describe returns `description`, predict returns `image`.
    pub fn working(description: &str, image: &str) -> Self {
        Self::new(
            json_reply(
                200,
                serde_json::json!({
                    "candidates": [{ "content": { "parts": [{ "text": description }] } }]
                }),
            ),
            json_reply(
                200,
                serde_json::json!({
                    "predictions": [{ "bytesBase64Encoded": image, "mimeType": "image/png" }]
                }),
            ),
        )
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.endpoint == endpoint)
            .collect()
    }

    fn record(&self, endpoint: Endpoint, api_key: &str, payload: &Value) {
        self.calls.lock().unwrap().push(Call {
            endpoint,
            api_key: api_key.to_string(),
            payload: payload.clone(),
        });
    }
}

pub fn json_reply(status: u16, body: Value) -> UpstreamReply {
    UpstreamReply::new(status, body.to_string())
}

#[async_trait]
impl Upstream for FakeUpstream {
    async fn predict(&self, api_key: &str, payload: &Value) -> Result<UpstreamReply> {
        self.record(Endpoint::Predict, api_key, payload);
        Ok(self.predict_reply.clone())
    }

    async fn generate_content(&self, api_key: &str, payload: &Value) -> Result<UpstreamReply> {
        self.record(Endpoint::GenerateContent, api_key, payload);
        Ok(self.describe_reply.clone())
    }
}
