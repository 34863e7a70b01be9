//! Wire shapes for the Gemini `generateContent` and Imagen `predict` endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl GenerateContentRequest {
    /// A single-turn request carrying an instruction and one inline image.
    pub fn describe_image(instruction: &str, mime_type: &str, image_data: &str) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: Some(instruction.to_string()),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: mime_type.to_string(),
                            data: image_data.to_string(),
                        }),
                    },
                ],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if it holds any
    /// non-blank text.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<Instance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
pub struct Instance {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub sample_count: u32,
}

impl PredictRequest {
    pub fn single(prompt: impl Into<String>) -> Self {
        PredictRequest {
            instances: vec![Instance {
                prompt: prompt.into(),
            }],
            parameters: PredictParameters { sample_count: 1 },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
}

impl PredictResponse {
    pub fn first_image(&self) -> Option<&str> {
        self.predictions
            .first()
            .and_then(|prediction| prediction.bytes_base64_encoded.as_deref())
            .filter(|bytes| !bytes.is_empty())
    }
}
