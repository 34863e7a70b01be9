use std::sync::Arc;

use log::{error, info};
use serde_json::Value;

use crate::error::{ProxyError, Result, Step};
use crate::upstream::{Upstream, UpstreamReply};

/// Forwards image-generation bodies to the upstream `predict` endpoint with
/// the server's credential attached.
pub struct Relay {
    api_key: Option<String>,
    upstream: Arc<dyn Upstream>,
}

impl Relay {
    pub fn new(api_key: Option<String>, upstream: Arc<dyn Upstream>) -> Self {
        Self { api_key, upstream }
    }

    /// Returns the upstream reply untouched on success.
    pub async fn forward(&self, body: &Value) -> Result<UpstreamReply> {
        let api_key = self.api_key.as_deref().ok_or(ProxyError::MissingApiKey)?;

        info!("Relaying image generation request");
        let reply = self.upstream.predict(api_key, body).await?;

        if !reply.is_success() {
            let text = reply.text();
            error!("Upstream error for generate-bulldog: {} {}", reply.status, text);
            return Err(ProxyError::Upstream {
                step: Step::Relay,
                status: reply.status,
                body: text,
            });
        }

        // Success bodies must be JSON; anything else is a transport failure.
        reply.json::<Value>()?;
        Ok(reply)
    }
}
