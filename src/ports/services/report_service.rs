use crate::domain::{
    errors::HandlerResult,
    models::{ObjectLocation, Report},
};
use async_trait::async_trait;

/// Outcome of a successful report run
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub location: ObjectLocation,
    pub report: Report,
    /// The exact document written to `location`
    pub body: String,
}

/// Port for the daily media report
#[async_trait]
pub trait ReportService: Send + Sync + 'static {
    /// List the source bucket, build today's report and persist it
    async fn generate_report(&self) -> HandlerResult<GeneratedReport>;
}
