use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarzError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// An internal invariant was broken. Not recoverable; abort the run.
    #[error("Invariant violation: {0}")]
    Invariant(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MarzError>;
