use anyhow::{Context, Result};
use bucket_relay::{
    adapters::inbound::http::{AppState, create_router},
    adapters::outbound::storage::S3Settings,
    app::{AppBuilder, AppConfig, HandlerSettings, RepositoryBackend, StorageBackend},
    telemetry::{LogFormat, init_tracing},
};
use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bucket-relay-server")]
#[command(about = "Local invocation server for the bucket relay functions", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Storage backend type (memory, s3)
    #[arg(long, env = "STORAGE_BACKEND", default_value = "memory")]
    storage_backend: String,

    /// Repository backend type (memory, database, dynamodb)
    #[arg(long, env = "REPOSITORY_BACKEND", default_value = "memory")]
    repository_backend: String,

    /// AWS region for S3 and DynamoDB
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    aws_region: String,

    /// S3 endpoint URL (for MinIO or LocalStack)
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY")]
    s3_secret_key: Option<String>,

    /// Allow plain HTTP connections to the S3 endpoint
    #[arg(long, env = "S3_ALLOW_HTTP", default_value = "false")]
    s3_allow_http: bool,

    /// Database URL for the database repository backend (PostgreSQL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// DynamoDB endpoint URL (for DynamoDB Local)
    #[arg(long, env = "DYNAMODB_ENDPOINT")]
    dynamodb_endpoint: Option<String>,

    /// Bucket listed by the report function
    #[arg(long, env = "REPORT_SOURCE_BUCKET", default_value = bucket_relay::app::DEFAULT_REPORT_SOURCE_BUCKET)]
    report_source_bucket: String,

    /// File extension the report selects
    #[arg(long, env = "REPORT_EXTENSION", default_value = bucket_relay::app::DEFAULT_REPORT_EXTENSION)]
    report_extension: String,

    /// Bucket the report is written to (defaults to the source bucket)
    #[arg(long, env = "REPORT_BUCKET")]
    report_bucket: Option<String>,

    /// Objects requested per listing page
    #[arg(long, env = "LISTING_PAGE_SIZE", default_value = "1000")]
    listing_page_size: usize,

    /// Table the import function writes to
    #[arg(long, env = "RECORD_TABLE", default_value = bucket_relay::app::DEFAULT_RECORD_TABLE)]
    record_table: String,

    /// Bucket the replication function copies into
    #[arg(long, env = "REPLICATION_DESTINATION_BUCKET", default_value = bucket_relay::app::DEFAULT_REPLICATION_DESTINATION_BUCKET)]
    replication_destination_bucket: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "s3" => StorageBackend::S3(
                S3Settings::builder()
                    .region(self.aws_region.clone())
                    .maybe_endpoint(self.s3_endpoint.clone())
                    .maybe_access_key(self.s3_access_key.clone())
                    .maybe_secret_key(self.s3_secret_key.clone())
                    .allow_http(self.s3_allow_http)
                    .build(),
            ),
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let repository_backend = match self.repository_backend.as_str() {
            "memory" => RepositoryBackend::InMemory,
            "database" | "db" => {
                let connection_string = self
                    .database_url
                    .clone()
                    .context("DATABASE_URL is required for database backend")?;
                RepositoryBackend::Database { connection_string }
            }
            "dynamodb" => RepositoryBackend::DynamoDb {
                region: self.aws_region.clone(),
                endpoint: self.dynamodb_endpoint.clone(),
            },
            _ => anyhow::bail!("Unknown repository backend: {}", self.repository_backend),
        };

        let handlers = HandlerSettings::builder()
            .report_source_bucket(self.report_source_bucket.clone())
            .report_extension(self.report_extension.clone())
            .maybe_report_bucket(self.report_bucket.clone())
            .listing_page_size(self.listing_page_size)
            .record_table(self.record_table.clone())
            .replication_destination_bucket(self.replication_destination_bucket.clone())
            .build();

        Ok(AppConfig {
            storage_backend,
            repository_backend,
            handlers,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format, &cli.log_level);

    info!(
        storage_backend = %cli.storage_backend,
        repository_backend = %cli.repository_backend,
        "starting bucket relay server"
    );

    let config = cli.to_app_config()?;
    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    let router = create_router(AppState::from(app_services));

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}
