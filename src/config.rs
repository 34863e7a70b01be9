use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_DESCRIBE_MODEL: &str = "gemini-2.5-flash-preview-05-20";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";
const DEFAULT_JSON_LIMIT: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub describe_model: String,
    pub image_model: String,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub json_limit: usize,
    /// Origins allowed by CORS. Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            describe_model: DEFAULT_DESCRIBE_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: PathBuf::from("./static"),
            json_limit: DEFAULT_JSON_LIMIT,
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the process environment once. Call after `dotenv().ok()`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => defaults.port,
        };

        let json_limit = match lookup("JSON_LIMIT_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("JSON_LIMIT_BYTES must be a byte count, got {:?}", raw))?,
            None => defaults.json_limit,
        };

        Ok(Config {
            api_key: normalize_key(lookup("GOOGLE_API_KEY")),
            base_url: lookup("GOOGLE_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            describe_model: lookup("DESCRIBE_MODEL").unwrap_or(defaults.describe_model),
            image_model: lookup("IMAGE_MODEL").unwrap_or(defaults.image_model),
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            json_limit,
            cors_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.cors_origins),
        })
    }

    #[cfg(test)]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = normalize_key(Some(api_key.into()));
        self
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

// Blank keys are treated as unset.
fn normalize_key(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}
