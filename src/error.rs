use thiserror::Error;

/// Errors raised while reading a JSON:API document
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("document root must be a JSON object")]
    NotAnObject,

    #[error("invalid JSON:API document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}
