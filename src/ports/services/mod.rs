mod import_service;
mod replication_service;
mod report_service;

pub use import_service::ImportService;
pub use replication_service::ReplicationService;
pub use report_service::{GeneratedReport, ReportService};
