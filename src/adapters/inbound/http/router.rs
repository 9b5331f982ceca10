use axum::{
    Router,
    body::Body,
    routing::{get, post},
};
use http::Request;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{
    handlers::{health, invoke_import, invoke_replicate, invoke_report, invoke_unknown},
    middleware::{REQUEST_ID_HEADER, RequestIdLayer},
};
use crate::{
    app::AppServices,
    ports::services::{ImportService, ReplicationService, ReportService},
};

/// Application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub report_service: Arc<dyn ReportService>,
    pub import_service: Arc<dyn ImportService>,
    pub replication_service: Arc<dyn ReplicationService>,
}

impl From<AppServices> for AppState {
    fn from(services: AppServices) -> Self {
        Self {
            report_service: Arc::new(services.report_service),
            import_service: Arc::new(services.import_service),
            replication_service: Arc::new(services.replication_service),
        }
    }
}

/// Local invocation endpoint: one route per function, shaped like the
/// Lambda invoke API
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/functions/report/invocations", post(invoke_report))
        .route("/functions/import/invocations", post(invoke_import))
        .route("/functions/replicate/invocations", post(invoke_replicate))
        .route("/functions/{name}/invocations", post(invoke_unknown))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        // Outermost, so the id exists before the trace span is opened
        .layer(RequestIdLayer)
        .with_state(state)
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id
    )
}
