use thiserror::Error as ThisError;

use super::{RecordStoreError, StorageError, ValidationError};

/// Failure of a handler invocation
#[derive(ThisError, Debug)]
pub enum HandlerError {
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    RecordStore(#[from] RecordStoreError),

    #[error("Invalid JSON document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for handler operations
pub type HandlerResult<T> = Result<T, HandlerError>;

impl HandlerError {
    /// Short machine-readable name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::InvalidEvent(_) => "InvalidEventError",
            HandlerError::Validation(_) => "ValidationError",
            HandlerError::Storage(_) => "StorageError",
            HandlerError::RecordStore(_) => "RecordStoreError",
            HandlerError::Parse(_) => "JsonParseError",
        }
    }
}
