mod import_service_impl;
mod replication_service_impl;
mod report_service_impl;

pub use import_service_impl::ImportServiceImpl;
pub use replication_service_impl::ReplicationServiceImpl;
pub use report_service_impl::ReportServiceImpl;
