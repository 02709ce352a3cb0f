//! Error types for Tumblr API operations.

use thiserror::Error;

use crate::platform::PlatformError;

#[derive(Debug, Error)]
pub enum TumblrError {
    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration (base URL, credentials).
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<TumblrError> for PlatformError {
    fn from(err: TumblrError) -> Self {
        match err {
            TumblrError::Http(message) => PlatformError::Transport { message },
            TumblrError::Json(e) => PlatformError::Decode {
                message: e.to_string(),
            },
            TumblrError::Api { status, message } => match status {
                401 | 403 => PlatformError::Unauthorized { service: "tumblr" },
                404 => PlatformError::NotFound { resource: message },
                _ => PlatformError::Api { status, message },
            },
            TumblrError::Config(message) => PlatformError::Config { message },
        }
    }
}
