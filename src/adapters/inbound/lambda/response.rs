use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::models::to_indented_json;

/// Proxy-style result returned by the report function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    /// 500 response whose body is `{"error": message}`
    pub fn error(message: &str) -> Self {
        let body = json!({ "error": message });
        // A string-keyed Value cannot fail to serialize; the compact form
        // stands in should that ever change
        let body = to_indented_json(&body).unwrap_or_else(|_| body.to_string());
        Self {
            status_code: 500,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
