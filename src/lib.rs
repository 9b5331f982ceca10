pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;
pub mod telemetry;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    BucketName,
    DomainValidationError,
    // Errors
    HandlerError,
    // Value objects
    ObjectKey,
    // Models
    ObjectLocation,
    ObjectSummary,
    Record,
    RecordStoreError,
    Report,
    ReportEntry,
    ReportFilter,
    StorageError,
    TableName,
};

// Port types - interfaces for external systems
pub use ports::{
    Clock,
    GeneratedReport,
    // Service ports
    ImportService,
    // Repository ports
    RecordRepository,
    ReplicationService,
    ReportService,
    // Storage ports
    ObjectStore,
};

// Service implementations - business logic
pub use services::{ImportServiceImpl, ReplicationServiceImpl, ReportServiceImpl};

// Application factory and configuration
pub use app::{
    AppBuilder, AppConfig, AppDependencies, AppError, AppServices, HandlerSettings,
    RepositoryBackend, StorageBackend, create_app_from_env, create_in_memory_app,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    clock::{FixedClock, SystemClock},
    persistence::{DynamoDbRecordRepository, InMemoryRecordRepository, SqlRecordRepository},
    storage::{ApacheObjectStoreAdapter, S3Settings},
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        ApacheObjectStoreAdapter, AppBuilder, AppServices, BucketName, FixedClock,
        ImportService, InMemoryRecordRepository, ObjectKey, ObjectLocation, ObjectStore,
        ReplicationService, ReportService, TableName, create_in_memory_app,
    };
}
