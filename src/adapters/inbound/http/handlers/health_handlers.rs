use axum::Json;

use crate::adapters::inbound::http::dto::HealthDto;

/// Liveness check
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto::ok())
}
