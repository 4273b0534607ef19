use thiserror::Error;

/// Result type for vocabulary operations
pub type Result<T> = std::result::Result<T, VocabularyError>;

/// Errors that can occur while ingesting or reading vocabulary
#[derive(Error, Debug)]
pub enum VocabularyError {
    /// An ingestion record failed validation
    #[error("Invalid vocabulary entry #{index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    /// The custom table lock was poisoned by a panicking writer
    #[error("Vocabulary lock poisoned")]
    LockPoisoned,

    /// IO error while reading an ingestion file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed ingestion JSON
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl VocabularyError {
    /// Create an invalid entry error
    pub fn invalid_entry(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            index,
            reason: reason.into(),
        }
    }
}
