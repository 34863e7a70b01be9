use actix_web::http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Which upstream call produced an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Relay,
    Describe,
    Generate,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Relay => write!(f, "API request failed"),
            Step::Describe => write!(f, "Image description failed"),
            Step::Generate => write!(f, "Image generation failed"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Google API key not configured on the server.")]
    MissingApiKey,

    #[error("No image data provided.")]
    MissingImageData,

    #[error("{step}: {body}")]
    Upstream { step: Step, status: u16, body: String },

    #[error("Failed to get description from the image.")]
    MissingDescription,

    #[error("Failed to get generated image from the response.")]
    MissingGeneratedImage,

    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProxyError>;

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingImageData => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::MissingApiKey
            | ProxyError::MissingDescription
            | ProxyError::MissingGeneratedImage
            | ProxyError::Transport(_)
            | ProxyError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Transport-class failures never carry detail back to the caller.
    pub fn is_transport(&self) -> bool {
        matches!(self, ProxyError::Transport(_) | ProxyError::Decode(_))
    }

    /// Message returned to the caller; `transport_message` replaces the
    /// detail of transport-class failures.
    pub fn public_message(&self, transport_message: &str) -> String {
        if self.is_transport() {
            transport_message.to_string()
        } else {
            self.to_string()
        }
    }
}
