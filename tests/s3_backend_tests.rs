use bucket_relay::{
    AppBuilder, HandlerSettings, ObjectKey, ObjectLocation, RepositoryBackend, S3Settings,
    StorageBackend, BucketName,
    adapters::outbound::storage::{AmazonS3StoreFactory, ApacheObjectStoreAdapter},
    ports::{ObjectStore, ReplicationService, ReportService},
};
use std::sync::Arc;

// These tests require an S3-compatible server (e.g. MinIO) with the buckets
// below already created:
// - S3_ENDPOINT (default: http://localhost:9000)
// - S3_ACCESS_KEY / S3_SECRET_KEY (default: minioadmin)
// - buckets `media-ingest-temporary` and `bucketdestnation202111`

fn settings() -> S3Settings {
    S3Settings::builder()
        .endpoint(
            std::env::var("S3_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string()),
        )
        .access_key(std::env::var("S3_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string()))
        .secret_key(std::env::var("S3_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string()))
        .allow_http(true)
        .build()
}

#[tokio::test]
#[ignore = "requires MinIO server to be running"]
async fn test_report_and_replication_against_s3() {
    let services = AppBuilder::new()
        .with_storage_backend(StorageBackend::S3(settings()))
        .with_repository_backend(RepositoryBackend::InMemory)
        .with_handler_settings(HandlerSettings::builder().listing_page_size(2).build())
        .build()
        .await
        .unwrap();

    let store = ApacheObjectStoreAdapter::new(Arc::new(AmazonS3StoreFactory::new(settings())));
    let source = ObjectLocation::new(
        BucketName::new("media-ingest-temporary").unwrap(),
        ObjectKey::new("integration/clip.mp4").unwrap(),
    );
    store
        .put_object(&source, b"frames".to_vec(), Some("video/mp4"))
        .await
        .unwrap();

    let generated = services.report_service.generate_report().await.unwrap();
    assert!(
        generated
            .report
            .files
            .iter()
            .any(|f| f.key == "integration/clip.mp4")
    );
    assert!(store.get_object(&generated.location).await.is_ok());

    let destination = services
        .replication_service
        .replicate_object(&source)
        .await
        .unwrap();
    assert_eq!(store.get_object(&destination).await.unwrap(), b"frames");
}
