use std::sync::Arc;
use tracing::info;

use crate::{
    adapters::outbound::{
        clock::SystemClock,
        persistence::{DynamoDbRecordRepository, InMemoryRecordRepository, SqlRecordRepository},
        storage::{AmazonS3StoreFactory, ApacheObjectStoreAdapter, BucketStoreFactory, S3Settings},
    },
    domain::{
        models::ReportFilter,
        value_objects::{BucketName, TableName},
    },
    ports::{clock::Clock, repositories::RecordRepository, storage::ObjectStore},
    services::{ImportServiceImpl, ReplicationServiceImpl, ReportServiceImpl},
};

pub const DEFAULT_REPORT_SOURCE_BUCKET: &str = "media-ingest-temporary";
pub const DEFAULT_REPORT_EXTENSION: &str = ".mp4";
pub const DEFAULT_RECORD_TABLE: &str = "s3todynamodb";
pub const DEFAULT_REPLICATION_DESTINATION_BUCKET: &str = "bucketdestnation202111";

/// Configuration for the application
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
    pub handlers: HandlerSettings,
}

/// Storage backend configuration
#[derive(Debug, Clone, Default)]
pub enum StorageBackend {
    #[default]
    InMemory,
    /// Amazon S3 or any S3-compatible service (MinIO, LocalStack)
    S3(S3Settings),
}

/// Repository backend configuration
#[derive(Debug, Clone, Default)]
pub enum RepositoryBackend {
    #[default]
    InMemory,
    Database {
        connection_string: String,
    },
    DynamoDb {
        region: String,
        endpoint: Option<String>,
    },
}

/// Names and knobs of the three functions. Values are validated when the
/// services are built.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct HandlerSettings {
    #[builder(into, default = DEFAULT_REPORT_SOURCE_BUCKET.to_string())]
    pub report_source_bucket: String,
    #[builder(into, default = DEFAULT_REPORT_EXTENSION.to_string())]
    pub report_extension: String,
    /// Bucket the report is written to; the source bucket when unset
    #[builder(into)]
    pub report_bucket: Option<String>,
    #[builder(default = ApacheObjectStoreAdapter::DEFAULT_PAGE_SIZE)]
    pub listing_page_size: usize,
    #[builder(into, default = DEFAULT_RECORD_TABLE.to_string())]
    pub record_table: String,
    #[builder(into, default = DEFAULT_REPLICATION_DESTINATION_BUCKET.to_string())]
    pub replication_destination_bucket: String,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of
    /// a variable or `None` when it is unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let region = var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string());

        let storage_backend = match var("STORAGE_BACKEND").as_deref() {
            None | Some("memory") => StorageBackend::InMemory,
            Some("s3") => StorageBackend::S3(
                S3Settings::builder()
                    .region(region.clone())
                    .maybe_endpoint(var("S3_ENDPOINT"))
                    .maybe_access_key(var("S3_ACCESS_KEY"))
                    .maybe_secret_key(var("S3_SECRET_KEY"))
                    .allow_http(var("S3_ALLOW_HTTP").is_some_and(|v| parse_flag(&v)))
                    .build(),
            ),
            Some(other) => {
                return Err(AppError::Configuration {
                    message: format!("Unknown storage backend: {}", other),
                });
            }
        };

        let repository_backend = match var("REPOSITORY_BACKEND").as_deref() {
            None | Some("memory") => RepositoryBackend::InMemory,
            Some("database") | Some("db") => {
                let connection_string =
                    var("DATABASE_URL").ok_or_else(|| AppError::Configuration {
                        message: "DATABASE_URL environment variable required".to_string(),
                    })?;
                RepositoryBackend::Database { connection_string }
            }
            Some("dynamodb") => RepositoryBackend::DynamoDb {
                region,
                endpoint: var("DYNAMODB_ENDPOINT"),
            },
            Some(other) => {
                return Err(AppError::Configuration {
                    message: format!("Unknown repository backend: {}", other),
                });
            }
        };

        let listing_page_size = match var("LISTING_PAGE_SIZE") {
            Some(raw) => raw.parse().map_err(|_| AppError::Configuration {
                message: format!("LISTING_PAGE_SIZE must be a positive integer, got '{}'", raw),
            })?,
            None => ApacheObjectStoreAdapter::DEFAULT_PAGE_SIZE,
        };

        let defaults = HandlerSettings::default();
        let handlers = HandlerSettings::builder()
            .report_source_bucket(
                var("REPORT_SOURCE_BUCKET").unwrap_or(defaults.report_source_bucket),
            )
            .report_extension(var("REPORT_EXTENSION").unwrap_or(defaults.report_extension))
            .maybe_report_bucket(var("REPORT_BUCKET"))
            .listing_page_size(listing_page_size)
            .record_table(var("RECORD_TABLE").unwrap_or(defaults.record_table))
            .replication_destination_bucket(
                var("REPLICATION_DESTINATION_BUCKET")
                    .unwrap_or(defaults.replication_destination_bucket),
            )
            .build();

        Ok(Self {
            storage_backend,
            repository_backend,
            handlers,
        })
    }
}

pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

/// Application dependencies container
#[derive(Clone)]
pub struct AppDependencies {
    pub object_store: Arc<dyn ObjectStore>,
    pub record_repository: Arc<dyn RecordRepository>,
    pub clock: Arc<dyn Clock>,
}

/// Application services container
#[derive(Clone)]
pub struct AppServices {
    pub report_service: ReportServiceImpl,
    pub import_service: ImportServiceImpl,
    pub replication_service: ReplicationServiceImpl,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    clock: Option<Arc<dyn Clock>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            clock: None,
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Configure repository backend
    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    pub fn with_handler_settings(mut self, handlers: HandlerSettings) -> Self {
        self.config.handlers = handlers;
        self
    }

    /// Replace the wall clock, e.g. to regenerate the report of a past day
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(&self) -> Result<AppDependencies, AppError> {
        let object_store = self.create_object_store()?;
        let record_repository = self.create_record_repository().await?;
        let clock = self
            .clock
            .clone()
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);

        Ok(AppDependencies {
            object_store,
            record_repository,
            clock,
        })
    }

    /// Wire the services onto already constructed dependencies
    pub fn build_services(&self, deps: &AppDependencies) -> Result<AppServices, AppError> {
        let settings = &self.config.handlers;

        let report_service = ReportServiceImpl::builder()
            .store(deps.object_store.clone())
            .clock(deps.clock.clone())
            .source_bucket(bucket_setting(
                "report source bucket",
                &settings.report_source_bucket,
            )?)
            .maybe_report_bucket(
                settings
                    .report_bucket
                    .as_deref()
                    .map(|bucket| bucket_setting("report bucket", bucket))
                    .transpose()?,
            )
            .filter(ReportFilter::new(settings.report_extension.as_str()).map_err(|e| {
                AppError::Configuration {
                    message: format!("Invalid report extension: {}", e),
                }
            })?)
            .build();

        let table = TableName::new(settings.record_table.as_str()).map_err(|e| {
            AppError::Configuration {
                message: format!("Invalid record table: {}", e),
            }
        })?;
        let import_service = ImportServiceImpl::new(
            deps.object_store.clone(),
            deps.record_repository.clone(),
            table,
        );

        let replication_service = ReplicationServiceImpl::new(
            deps.object_store.clone(),
            bucket_setting(
                "replication destination bucket",
                &settings.replication_destination_bucket,
            )?,
        );

        Ok(AppServices {
            report_service,
            import_service,
            replication_service,
        })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;
        self.build_services(&deps)
    }

    /// Create the object store adapter based on configuration
    fn create_object_store(&self) -> Result<Arc<dyn ObjectStore>, AppError> {
        let adapter = match &self.config.storage_backend {
            StorageBackend::InMemory => ApacheObjectStoreAdapter::in_memory(),
            StorageBackend::S3(settings) => {
                info!(
                    region = %settings.region,
                    endpoint = settings.endpoint.as_deref().unwrap_or("aws"),
                    "using S3 storage backend"
                );
                let factory = AmazonS3StoreFactory::new(settings.clone());
                // Surface client misconfiguration at startup rather than on
                // the first invocation
                let source =
                    bucket_setting("report source bucket", &self.config.handlers.report_source_bucket)?;
                factory
                    .create_store(&source)
                    .map_err(|e| AppError::StorageInit {
                        message: e.to_string(),
                    })?;
                ApacheObjectStoreAdapter::new(Arc::new(factory))
            }
        };

        Ok(Arc::new(
            adapter.with_page_size(self.config.handlers.listing_page_size),
        ))
    }

    /// Create the record repository based on configuration
    async fn create_record_repository(&self) -> Result<Arc<dyn RecordRepository>, AppError> {
        match &self.config.repository_backend {
            RepositoryBackend::InMemory => Ok(Arc::new(InMemoryRecordRepository::new())),
            RepositoryBackend::Database { connection_string } => {
                let repository = SqlRecordRepository::connect(connection_string)
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("Failed to connect to database: {}", e),
                    })?;

                let table = TableName::new(self.config.handlers.record_table.as_str())
                    .map_err(|e| AppError::Configuration {
                        message: format!("Invalid record table: {}", e),
                    })?;
                repository
                    .migrate(&table)
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("Failed to prepare table {}: {}", table, e),
                    })?;

                Ok(Arc::new(repository))
            }
            RepositoryBackend::DynamoDb { region, endpoint } => Ok(Arc::new(
                DynamoDbRecordRepository::from_env(region, endpoint.as_deref()).await,
            )),
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn bucket_setting(what: &str, value: &str) -> Result<BucketName, AppError> {
    BucketName::new(value).map_err(|e| AppError::Configuration {
        message: format!("Invalid {} '{}': {}", what, value, e),
    })
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

/// Create application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_config(AppConfig::from_env()?)
        .build()
        .await
}
