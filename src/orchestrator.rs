use std::sync::Arc;

use log::{debug, error, info};
use uuid::Uuid;

use crate::error::{ProxyError, Result, Step};
use crate::prompt::{compose_prompt, DESCRIBE_INSTRUCTION};
use crate::upstream::schema::{GenerateContentRequest, GenerateContentResponse, PredictRequest, PredictResponse};
use crate::upstream::Upstream;
use crate::web::models::{DescribeRequest, GenerationResult};

const DEFAULT_MIME_TYPE: &str = "image/png";

/// Describes an uploaded photo, folds the description into the persona
/// prompt and generates a new image from it. The two upstream calls run
/// strictly in sequence.
pub struct Orchestrator {
    api_key: Option<String>,
    upstream: Arc<dyn Upstream>,
}

impl Orchestrator {
    pub fn new(api_key: Option<String>, upstream: Arc<dyn Upstream>) -> Self {
        Self { api_key, upstream }
    }

    pub async fn run(&self, request: DescribeRequest) -> Result<GenerationResult> {
        let api_key = self.api_key.as_deref().ok_or(ProxyError::MissingApiKey)?;

        let image_data = request
            .image_data
            .as_deref()
            .filter(|data| !data.is_empty())
            .ok_or(ProxyError::MissingImageData)?;
        let mime_type = request
            .mime_type
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE);

        let request_id = Uuid::new_v4();
        info!("[{}] describe-and-generate started", request_id);

        let description = self
            .describe(request_id, api_key, mime_type, image_data)
            .await?;

        let prompt = compose_prompt(Some(description.as_str()), request.user_prompt.as_deref());
        debug!("[{}] Composed prompt: {}", request_id, prompt);

        let generated_image = self.generate(request_id, api_key, &prompt).await?;
        info!("[{}] describe-and-generate finished", request_id);

        Ok(GenerationResult {
            description: prompt,
            generated_image,
        })
    }

    async fn describe(
        &self,
        request_id: Uuid,
        api_key: &str,
        mime_type: &str,
        image_data: &str,
    ) -> Result<String> {
        let payload = serde_json::to_value(GenerateContentRequest::describe_image(
            DESCRIBE_INSTRUCTION,
            mime_type,
            image_data,
        ))?;

        info!("[{}] Requesting image description ({} base64 chars)", request_id, image_data.len());
        let reply = self.upstream.generate_content(api_key, &payload).await?;

        if !reply.is_success() {
            let text = reply.text();
            error!("[{}] Upstream error for image description: {} {}", request_id, reply.status, text);
            return Err(ProxyError::Upstream {
                step: Step::Describe,
                status: reply.status,
                body: text,
            });
        }

        let response: GenerateContentResponse = reply.json()?;
        let description = response.first_text().ok_or_else(|| {
            error!("[{}] Description response carried no text", request_id);
            ProxyError::MissingDescription
        })?;
        debug!("[{}] Description: {}", request_id, description);

        Ok(description.to_string())
    }

    async fn generate(&self, request_id: Uuid, api_key: &str, prompt: &str) -> Result<String> {
        let payload = serde_json::to_value(PredictRequest::single(prompt))?;

        info!("[{}] Requesting image generation", request_id);
        let reply = self.upstream.predict(api_key, &payload).await?;

        if !reply.is_success() {
            let text = reply.text();
            error!(
                "[{}] Upstream error for image generation from description: {} {}",
                request_id, reply.status, text
            );
            return Err(ProxyError::Upstream {
                step: Step::Generate,
                status: reply.status,
                body: text,
            });
        }

        let response: PredictResponse = reply.json()?;
        let image = response.first_image().ok_or_else(|| {
            error!("[{}] Generation response carried no image", request_id);
            ProxyError::MissingGeneratedImage
        })?;

        Ok(image.to_string())
    }
}
