//! Error types for the Wazo finder core.

use thiserror::Error;

/// Core error type for lookup and remediation operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid MAC address format: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Remediation failed: {0}")]
    Remediation(String),

    #[error("Operation interrupted")]
    Interrupted,
}

/// Transport and HTTP errors raised while talking to a Wazo server.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Server configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No Wazo server configured (set WAZO_HOST and WAZO_TOKEN)")]
    NoServers,

    #[error("Invalid server index {index}: {count} server(s) configured")]
    InvalidServerIndex { index: usize, count: usize },

    #[error("Missing {0} for explicit server override")]
    MissingOverride(&'static str),

    #[error("Failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Errors raised by an interactive confirmation prompt.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Input closed")]
    Closed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PromptError> for CoreError {
    fn from(_: PromptError) -> Self {
        CoreError::Interrupted
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
