use bucket_relay::{
    AppBuilder, AppDependencies, AppServices, BucketName, FixedClock, HandlerSettings,
    InMemoryRecordRepository, ObjectKey, ObjectLocation, Report,
    adapters::{inbound::lambda::handle_report, outbound::storage::ApacheObjectStoreAdapter},
    ports::{ObjectStore, ReportService},
};
use chrono::{DateTime, Duration, Utc};
use object_store::memory::InMemory;
use std::sync::Arc;

const SOURCE: &str = "media-ingest-temporary";

fn location(bucket: &str, key: &str) -> ObjectLocation {
    ObjectLocation::new(BucketName::new(bucket).unwrap(), ObjectKey::new(key).unwrap())
}

fn services(
    store: Arc<ApacheObjectStoreAdapter>,
    now: DateTime<Utc>,
    settings: HandlerSettings,
) -> AppServices {
    let deps = AppDependencies {
        object_store: store,
        record_repository: Arc::new(InMemoryRecordRepository::new()),
        clock: Arc::new(FixedClock::new(now)),
    };
    AppBuilder::new()
        .with_handler_settings(settings)
        .build_services(&deps)
        .unwrap()
}

async fn seed(store: &ApacheObjectStoreAdapter, keys: &[&str]) {
    for key in keys {
        store
            .put_object(&location(SOURCE, key), key.as_bytes().to_vec(), None)
            .await
            .unwrap();
    }
}

fn keys(report: &Report) -> Vec<&str> {
    report.files.iter().map(|f| f.key.as_str()).collect()
}

#[tokio::test]
async fn test_report_lists_todays_mp4_files() {
    let store = Arc::new(ApacheObjectStoreAdapter::in_memory());
    seed(
        &store,
        &["a.mp4", "notes.txt", "videos/c.mp4", "upper.MP4", "clip.mp4.part"],
    )
    .await;
    let now = Utc::now();
    let app = services(store.clone(), now, HandlerSettings::default());

    let generated = app.report_service.generate_report().await.unwrap();

    assert_eq!(generated.report.total_files, 2);
    assert_eq!(keys(&generated.report), vec!["a.mp4", "videos/c.mp4"]);
    assert_eq!(
        generated.location.to_string(),
        format!(
            "s3://{}/report/mp4_objects_{}.json",
            SOURCE,
            now.format("%Y-%m-%d")
        )
    );

    let written = store.get_object(&generated.location).await.unwrap();
    assert_eq!(String::from_utf8(written).unwrap(), generated.body);

    let document: serde_json::Value = serde_json::from_str(&generated.body).unwrap();
    assert_eq!(document["total_files"], 2);
    assert_eq!(document["files"][0]["Key"], "a.mp4");
    assert!(
        document["files"][0]["LastModified"]
            .as_str()
            .unwrap()
            .ends_with("+00:00")
    );
}

#[tokio::test]
async fn test_report_for_another_day_is_empty() {
    let store = Arc::new(ApacheObjectStoreAdapter::in_memory());
    seed(&store, &["a.mp4", "b.mp4"]).await;
    let yesterday = Utc::now() - Duration::days(1);
    let app = services(store.clone(), yesterday, HandlerSettings::default());

    let generated = app.report_service.generate_report().await.unwrap();

    assert_eq!(generated.report.total_files, 0);
    assert_eq!(
        generated.location.key.as_str(),
        format!("report/mp4_objects_{}.json", yesterday.format("%Y-%m-%d"))
    );
    assert_eq!(
        generated.body,
        "{\n    \"total_files\": 0,\n    \"files\": []\n}"
    );
}

#[tokio::test]
async fn test_page_size_does_not_change_the_report() {
    // Both adapters serve the same underlying bucket
    let shared = Arc::new(InMemory::new());
    let bucket = BucketName::new(SOURCE).unwrap();

    let single_page = Arc::new(ApacheObjectStoreAdapter::in_memory());
    single_page.register_bucket(bucket.clone(), shared.clone()).await;
    let tiny_pages = Arc::new(ApacheObjectStoreAdapter::in_memory().with_page_size(1));
    tiny_pages.register_bucket(bucket, shared).await;

    seed(
        &single_page,
        &["a.mp4", "b.txt", "c.mp4", "d/e.mp4", "f.json", "g.mp4"],
    )
    .await;
    let now = Utc::now();

    let one = services(single_page, now, HandlerSettings::default())
        .report_service
        .generate_report()
        .await
        .unwrap();
    let many = services(tiny_pages, now, HandlerSettings::default())
        .report_service
        .generate_report()
        .await
        .unwrap();

    assert_eq!(keys(&one.report), vec!["a.mp4", "c.mp4", "d/e.mp4", "g.mp4"]);
    assert_eq!(one.report, many.report);
    assert_eq!(one.body, many.body);
}

#[tokio::test]
async fn test_rerun_overwrites_report_without_listing_it() {
    let store = Arc::new(ApacheObjectStoreAdapter::in_memory());
    seed(&store, &["a.mp4"]).await;
    let app = services(store.clone(), Utc::now(), HandlerSettings::default());

    let first = app.report_service.generate_report().await.unwrap();
    let second = app.report_service.generate_report().await.unwrap();

    assert_eq!(first.location, second.location);
    assert_eq!(first.body, second.body);
    assert_eq!(keys(&second.report), vec!["a.mp4"]);
}

#[tokio::test]
async fn test_report_written_to_dedicated_bucket() {
    let store = Arc::new(ApacheObjectStoreAdapter::in_memory());
    seed(&store, &["a.mp4"]).await;
    let settings = HandlerSettings::builder()
        .report_bucket("media-reports")
        .build();
    let app = services(store.clone(), Utc::now(), settings);

    let generated = app.report_service.generate_report().await.unwrap();
    assert_eq!(generated.location.bucket.as_str(), "media-reports");

    let source = BucketName::new(SOURCE).unwrap();
    let page = store.list_page(&source, None).await.unwrap();
    assert_eq!(page.objects.len(), 1);
    assert!(store.get_object(&generated.location).await.is_ok());
}

#[tokio::test]
async fn test_handler_wraps_report_in_response() {
    let store = Arc::new(ApacheObjectStoreAdapter::in_memory());
    seed(&store, &["a.mp4"]).await;
    let app = services(store, Utc::now(), HandlerSettings::default());

    let response = handle_report(&app.report_service).await;
    assert_eq!(response.status_code, 200);

    let document: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(document["total_files"], 1);
}

#[tokio::test]
async fn test_other_extension() {
    let store = Arc::new(ApacheObjectStoreAdapter::in_memory());
    seed(&store, &["a.mp4", "b.mov", "c/d.mov"]).await;
    let now = Utc::now();
    let settings = HandlerSettings::builder().report_extension(".mov").build();
    let app = services(store, now, settings);

    let generated = app.report_service.generate_report().await.unwrap();
    assert_eq!(keys(&generated.report), vec!["b.mov", "c/d.mov"]);
    assert_eq!(
        generated.location.key.as_str(),
        format!("report/mov_objects_{}.json", now.format("%Y-%m-%d"))
    );
}
