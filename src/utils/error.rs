use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Extraction error: {0}")]
    ExtractionError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Stage panicked: {0}")]
    StagePanicked(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
