use thiserror::Error;

#[derive(Error, Debug)]
pub enum TradusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A single translate call failed. Absorbed per unit by the document translators.
    #[error("Translation backend error: {0}")]
    Backend(String),

    #[error("Translation backend rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, TradusError>;
