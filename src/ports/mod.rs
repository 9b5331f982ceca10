pub mod clock;
pub mod repositories;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use clock::Clock;
pub use repositories::RecordRepository;
pub use services::{GeneratedReport, ImportService, ReplicationService, ReportService};
pub use storage::ObjectStore;
