use aws_lambda_events::event::s3::S3Event;
use tracing::{error, info};

use super::{event::object_location, response::InvocationResponse};
use crate::{
    domain::errors::HandlerResult,
    ports::services::{ImportService, ReplicationService, ReportService},
};

/// Run the daily report. Failures are folded into a 500 response instead
/// of failing the invocation.
pub async fn handle_report(service: &dyn ReportService) -> InvocationResponse {
    match service.generate_report().await {
        Ok(generated) => InvocationResponse::ok(generated.body),
        Err(e) => {
            error!(error = %e, kind = e.kind(), "report generation failed");
            InvocationResponse::error(&e.to_string())
        }
    }
}

/// Import the object named by an S3 notification. Failures propagate so
/// the runtime reports the invocation as failed.
pub async fn handle_import(service: &dyn ImportService, event: &S3Event) -> HandlerResult<()> {
    let source = object_location(event)?;
    service.import_object(&source).await?;
    info!(%source, "import finished");
    Ok(())
}

/// Replicate the object named by an S3 notification
pub async fn handle_replicate(
    service: &dyn ReplicationService,
    event: &S3Event,
) -> HandlerResult<()> {
    let source = object_location(event)?;
    let destination = service.replicate_object(&source).await?;
    info!(%source, %destination, "replication finished");
    Ok(())
}
