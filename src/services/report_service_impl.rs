use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    domain::{
        errors::{HandlerResult, StorageResult},
        models::{ObjectLocation, Report, ReportEntry, ReportFilter},
        value_objects::BucketName,
    },
    ports::{
        clock::Clock,
        services::{GeneratedReport, ReportService},
        storage::ObjectStore,
    },
};

/// Lists a bucket for today's uploads of one media type and writes a JSON
/// summary next to them (or into a dedicated report bucket)
#[derive(Clone, bon::Builder)]
pub struct ReportServiceImpl {
    store: Arc<dyn ObjectStore>,
    clock: Arc<dyn Clock>,
    source_bucket: BucketName,
    /// Defaults to the source bucket
    report_bucket: Option<BucketName>,
    filter: ReportFilter,
}

impl ReportServiceImpl {
    pub fn source_bucket(&self) -> &BucketName {
        &self.source_bucket
    }

    pub fn report_bucket(&self) -> &BucketName {
        self.report_bucket.as_ref().unwrap_or(&self.source_bucket)
    }

    /// Walk every listing page of the source bucket and keep the objects
    /// matching the filter for `day`, in listing order
    pub async fn collect_matching(&self, day: NaiveDate) -> StorageResult<Vec<ReportEntry>> {
        let mut entries = Vec::new();
        let mut continuation = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .store
                .list_page(&self.source_bucket, continuation.as_ref())
                .await?;
            pages += 1;

            entries.extend(
                page.objects
                    .iter()
                    .filter(|object| self.filter.matches(object, day))
                    .map(ReportEntry::from),
            );

            match page.next_continuation_token {
                Some(next) => continuation = Some(next),
                None => break,
            }
        }

        debug!(pages, matched = entries.len(), "listing exhausted");
        Ok(entries)
    }
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    #[tracing::instrument(
        skip(self),
        fields(bucket = %self.source_bucket, extension = self.filter.extension())
    )]
    async fn generate_report(&self) -> HandlerResult<GeneratedReport> {
        // One reading of the clock drives both the filter and the report key
        let today = self.clock.today();

        let report = Report::new(self.collect_matching(today).await?);
        let body = report.to_pretty_json()?;

        let location = ObjectLocation::new(
            self.report_bucket().clone(),
            self.filter.report_key(today)?,
        );
        self.store
            .put_object(&location, body.clone().into_bytes(), Some("application/json"))
            .await?;

        info!(
            %location,
            total_files = report.total_files,
            "report written"
        );

        Ok(GeneratedReport {
            location,
            report,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::{inbound::lambda::handle_report, outbound::clock::FixedClock},
        domain::{
            errors::{HandlerError, StorageError},
            models::{ContinuationToken, ListingPage, ObjectSummary},
            value_objects::ObjectKey,
        },
    };
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Mutex;

    /// Serves a fixed object list in pages of `page_size`, tokens being the
    /// index of the next object. Records every write.
    struct PagedStore {
        objects: Vec<ObjectSummary>,
        page_size: usize,
        fail_listing_at_page: Option<usize>,
        fail_writes: bool,
        calls: Mutex<usize>,
        writes: Mutex<Vec<(ObjectLocation, Vec<u8>)>>,
    }

    impl PagedStore {
        fn new(objects: Vec<ObjectSummary>, page_size: usize) -> Self {
            Self {
                objects,
                page_size,
                fail_listing_at_page: None,
                fail_writes: false,
                calls: Mutex::new(0),
                writes: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ObjectStore for PagedStore {
        async fn list_page(
            &self,
            bucket: &BucketName,
            continuation: Option<&ContinuationToken>,
        ) -> StorageResult<ListingPage> {
            let call = {
                let mut calls = self.calls.lock().unwrap();
                *calls += 1;
                *calls
            };
            if self.fail_listing_at_page == Some(call) {
                return Err(StorageError::AccessDenied {
                    bucket: bucket.clone(),
                    operation: "list objects".to_string(),
                });
            }

            let start = continuation.map_or(0, |t| t.as_str().parse::<usize>().unwrap());
            let end = (start + self.page_size).min(self.objects.len());
            Ok(ListingPage {
                objects: self.objects[start..end].to_vec(),
                next_continuation_token: (end < self.objects.len())
                    .then(|| ContinuationToken::new(end.to_string())),
            })
        }

        async fn get_object(&self, location: &ObjectLocation) -> StorageResult<Vec<u8>> {
            Err(StorageError::ObjectNotFound {
                bucket: location.bucket.clone(),
                key: location.key.clone(),
            })
        }

        async fn put_object(
            &self,
            location: &ObjectLocation,
            data: Vec<u8>,
            _content_type: Option<&str>,
        ) -> StorageResult<()> {
            if self.fail_writes {
                return Err(StorageError::AccessDenied {
                    bucket: location.bucket.clone(),
                    operation: "put object".to_string(),
                });
            }
            self.writes.lock().unwrap().push((location.clone(), data));
            Ok(())
        }

        async fn copy_object(
            &self,
            _source: &ObjectLocation,
            _destination: &ObjectLocation,
        ) -> StorageResult<()> {
            unreachable!("the reporter never copies")
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn object(key: &str, last_modified: DateTime<Utc>) -> ObjectSummary {
        ObjectSummary {
            key: ObjectKey::new(key).unwrap(),
            size: 1,
            last_modified,
            etag: None,
        }
    }

    fn service(store: Arc<PagedStore>) -> ReportServiceImpl {
        ReportServiceImpl::builder()
            .store(store)
            .clock(Arc::new(FixedClock::new(at(1, 12))))
            .source_bucket(BucketName::new("media-ingest-temporary").unwrap())
            .filter(ReportFilter::new(".mp4").unwrap())
            .build()
    }

    fn fixture() -> Vec<ObjectSummary> {
        let yesterday_late = Utc.with_ymd_and_hms(2024, 4, 30, 23, 59, 59).unwrap();
        vec![
            object("a.mp4", at(1, 9)),
            object("b.mp4", yesterday_late),
            object("c.txt", at(1, 10)),
            object("d.mp4", at(2, 0)),
            object("e/f.mp4", at(1, 0)),
            object("g.mp4", at(1, 23)),
        ]
    }

    #[tokio::test]
    async fn test_report_contains_only_todays_matches() {
        let store = Arc::new(PagedStore::new(fixture(), 1000));
        let generated = service(store.clone()).generate_report().await.unwrap();

        let keys: Vec<_> = generated.report.files.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["a.mp4", "e/f.mp4", "g.mp4"]);
        assert_eq!(generated.report.total_files, 3);
        assert_eq!(
            generated.location.to_string(),
            "s3://media-ingest-temporary/report/mp4_objects_2024-05-01.json"
        );

        let writes = store.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].1, generated.body.as_bytes());
    }

    #[tokio::test]
    async fn test_page_size_does_not_change_result() {
        let single = service(Arc::new(PagedStore::new(fixture(), 1000)))
            .generate_report()
            .await
            .unwrap();

        for page_size in [1, 2, 3, 4] {
            let store = Arc::new(PagedStore::new(fixture(), page_size));
            let paged = service(store.clone()).generate_report().await.unwrap();
            assert_eq!(paged.body, single.body, "page size {}", page_size);
            assert_eq!(
                *store.calls.lock().unwrap(),
                fixture().len().div_ceil(page_size)
            );
        }
    }

    #[tokio::test]
    async fn test_empty_bucket_still_writes_report() {
        let store = Arc::new(PagedStore::new(Vec::new(), 1000));
        let generated = service(store.clone()).generate_report().await.unwrap();

        assert_eq!(generated.report.total_files, 0);
        assert!(generated.report.files.is_empty());
        assert_eq!(store.writes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_listing_failure_writes_nothing() {
        let mut store = PagedStore::new(fixture(), 2);
        store.fail_listing_at_page = Some(2);
        let store = Arc::new(store);

        let err = service(store.clone()).generate_report().await.unwrap_err();
        assert!(matches!(err, HandlerError::Storage(StorageError::AccessDenied { .. })));
        assert!(store.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_after_listing() {
        let mut store = PagedStore::new(fixture(), 2);
        store.fail_writes = true;
        let store = Arc::new(store);

        let err = service(store.clone()).generate_report().await.unwrap_err();
        assert!(matches!(err, HandlerError::Storage(StorageError::AccessDenied { .. })));
        // Every page was read before the write was attempted
        assert_eq!(*store.calls.lock().unwrap(), 3);
        assert!(store.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_is_reported_as_500() {
        let mut store = PagedStore::new(fixture(), 1000);
        store.fail_writes = true;
        let service = service(Arc::new(store));

        let response = handle_report(&service).await;
        assert_eq!(response.status_code, 500);

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("media-ingest-temporary"), "{}", message);
        assert!(message.contains("put object"), "{}", message);
    }

    #[tokio::test]
    async fn test_report_bucket_override() {
        let store = Arc::new(PagedStore::new(fixture(), 1000));
        let service = ReportServiceImpl::builder()
            .store(store.clone())
            .clock(Arc::new(FixedClock::new(at(1, 12))))
            .source_bucket(BucketName::new("media-ingest-temporary").unwrap())
            .report_bucket(BucketName::new("media-reports").unwrap())
            .filter(ReportFilter::new(".mp4").unwrap())
            .build();

        let generated = service.generate_report().await.unwrap();
        assert_eq!(generated.location.bucket.as_str(), "media-reports");
    }
}
