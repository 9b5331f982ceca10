use crate::domain::value_objects::TableName;

/// Errors raised while persisting records
#[derive(Debug, Clone)]
pub enum RecordStoreError {
    /// The target table does not exist
    TableNotFound { table: TableName },

    /// Infrastructure error with external source
    InfrastructureError {
        message: String,
        source: Option<String>,
    },
}

impl std::fmt::Display for RecordStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordStoreError::TableNotFound { table } => {
                write!(f, "Table not found: {}", table)
            }
            RecordStoreError::InfrastructureError { message, .. } => {
                write!(f, "Record store error: {}", message)
            }
        }
    }
}

impl std::error::Error for RecordStoreError {}

/// Result type for record store operations
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;
