use serde::{Deserialize, Serialize};

use crate::domain::errors::HandlerError;

/// Error payload for a failed invocation, named like the Lambda invoke API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationErrorDto {
    #[serde(rename = "errorType")]
    pub error_type: String,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

impl InvocationErrorDto {
    pub fn new(error_type: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            error_message: error_message.into(),
        }
    }

    pub fn from_handler_error(error: &HandlerError) -> Self {
        Self::new(error.kind(), error.to_string())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new("InvalidRequestContentException", message)
    }

    pub fn unknown_function(name: &str) -> Self {
        Self::new(
            "ResourceNotFoundException",
            format!("Function not found: {}", name),
        )
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
}

impl HealthDto {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
