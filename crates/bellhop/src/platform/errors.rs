use thiserror::Error;

/// Failure talking to a remote blogging service.
///
/// Status-bearing failures keep the HTTP status so callers can tell a
/// rejected mutation from a server fault.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The service answered with a non-success status.
    #[error("remote API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Credentials were missing, expired or rejected (401/403).
    #[error("credentials rejected by {service}")]
    Unauthorized { service: &'static str },

    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// No response at all: DNS, connect, TLS or timeout.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// A success response whose body did not match the expected shape.
    #[error("undecodable response: {message}")]
    Decode { message: String },

    /// Client-side setup problem such as an unparsable base URL.
    #[error("client misconfigured: {message}")]
    Config { message: String },
}

impl PlatformError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// HTTP status behind this error, when the service produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Unauthorized { .. }
            | Self::Transport { .. }
            | Self::Decode { .. }
            | Self::Config { .. } => None,
        }
    }
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
