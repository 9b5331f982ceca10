use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use aws_lambda_events::event::s3::S3Event;
use bytes::Bytes;
use tracing::warn;

use crate::adapters::inbound::{
    http::{dto::InvocationErrorDto, router::AppState},
    lambda::{InvocationResponse, handle_import, handle_replicate, handle_report},
};

type InvocationError = (StatusCode, Json<InvocationErrorDto>);

fn parse_s3_event(body: &Bytes) -> Result<S3Event, InvocationError> {
    serde_json::from_slice(body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(InvocationErrorDto::invalid_request(format!(
                "Could not parse S3 event: {}",
                e
            ))),
        )
    })
}

/// Invoke the report function. The payload is ignored and the function's
/// own `{statusCode, body}` result is returned as-is.
pub async fn invoke_report(State(app_state): State<AppState>) -> Json<InvocationResponse> {
    Json(handle_report(app_state.report_service.as_ref()).await)
}

/// Invoke the import function with an S3 notification payload
pub async fn invoke_import(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, InvocationError> {
    let event = parse_s3_event(&body)?;

    handle_import(app_state.import_service.as_ref(), &event)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(InvocationErrorDto::from_handler_error(&e)),
            )
        })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Invoke the replication function with an S3 notification payload
pub async fn invoke_replicate(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, InvocationError> {
    let event = parse_s3_event(&body)?;

    handle_replicate(app_state.replication_service.as_ref(), &event)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(InvocationErrorDto::from_handler_error(&e)),
            )
        })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Any function name without a handler
pub async fn invoke_unknown(Path(name): Path<String>) -> InvocationError {
    warn!(function = %name, "invocation of unknown function");
    (
        StatusCode::NOT_FOUND,
        Json(InvocationErrorDto::unknown_function(&name)),
    )
}
