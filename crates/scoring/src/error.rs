use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoringError>;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("Prediction error: {0}")]
    PredictionError(String),

    #[error("Provider not ready: {0}")]
    NotReady(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("{0}")]
    Other(String),
}
