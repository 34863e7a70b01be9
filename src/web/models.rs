use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeRequest {
    /// Base64 image bytes, without a `data:` prefix.
    pub image_data: Option<String>,
    pub user_prompt: Option<String>,
    /// Defaults to `image/png`.
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// The composed prompt sent to the image model.
    pub description: String,
    pub generated_image: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
