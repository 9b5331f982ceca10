use crate::domain::value_objects::{BucketName, ObjectKey};

/// Errors that can occur during storage operations
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Object not found
    ObjectNotFound { bucket: BucketName, key: ObjectKey },

    /// Bucket does not exist or is not reachable
    BucketNotFound { bucket: BucketName },

    /// Access denied
    AccessDenied { bucket: BucketName, operation: String },

    /// Validation error
    ValidationError { message: String },

    /// Operation not supported by the backend
    UnsupportedOperation { operation: String, reason: String },

    /// Infrastructure error with external source
    InfrastructureError {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ObjectNotFound { bucket, key } => {
                write!(f, "Object not found: s3://{}/{}", bucket, key)
            }
            StorageError::BucketNotFound { bucket } => {
                write!(f, "Bucket not found: {}", bucket)
            }
            StorageError::AccessDenied { bucket, operation } => {
                write!(
                    f,
                    "Access denied for operation '{}' on bucket: {}",
                    operation, bucket
                )
            }
            StorageError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
            StorageError::UnsupportedOperation { operation, reason } => {
                write!(f, "Unsupported operation '{}': {}", operation, reason)
            }
            StorageError::InfrastructureError { message, .. } => {
                write!(f, "Infrastructure error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
