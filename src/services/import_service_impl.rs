use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::{
    domain::{
        errors::HandlerResult,
        models::{ObjectLocation, Record},
        value_objects::TableName,
    },
    ports::{repositories::RecordRepository, services::ImportService, storage::ObjectStore},
};

/// Copies the parsed contents of a JSON object into the record store
#[derive(Clone)]
pub struct ImportServiceImpl {
    store: Arc<dyn ObjectStore>,
    records: Arc<dyn RecordRepository>,
    table: TableName,
}

impl ImportServiceImpl {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        records: Arc<dyn RecordRepository>,
        table: TableName,
    ) -> Self {
        Self {
            store,
            records,
            table,
        }
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }
}

#[async_trait]
impl ImportService for ImportServiceImpl {
    #[tracing::instrument(skip(self, source), fields(%source, table = %self.table))]
    async fn import_object(&self, source: &ObjectLocation) -> HandlerResult<()> {
        let data = self.store.get_object(source).await?;
        let document: serde_json::Value = serde_json::from_slice(&data)?;
        let record = Record::try_from(document)?;

        self.records.put_record(&self.table, &record).await?;

        info!(attributes = record.len(), "record imported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::outbound::{
            persistence::InMemoryRecordRepository, storage::ApacheObjectStoreAdapter,
        },
        domain::{
            errors::{HandlerError, RecordStoreError, StorageError, ValidationError},
            value_objects::{BucketName, ObjectKey},
        },
    };
    use serde_json::json;

    struct Fixture {
        store: Arc<ApacheObjectStoreAdapter>,
        records: Arc<InMemoryRecordRepository>,
        service: ImportServiceImpl,
        table: TableName,
    }

    fn fixture_with(records: InMemoryRecordRepository) -> Fixture {
        let store = Arc::new(ApacheObjectStoreAdapter::in_memory());
        let records = Arc::new(records);
        let table = TableName::new("s3todynamodb").unwrap();
        let service = ImportServiceImpl::new(store.clone(), records.clone(), table.clone());
        Fixture {
            store,
            records,
            service,
            table,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(InMemoryRecordRepository::new())
    }

    fn location(key: &str) -> ObjectLocation {
        ObjectLocation::new(
            BucketName::new("json-uploads").unwrap(),
            ObjectKey::new(key).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_imports_top_level_fields() {
        let f = fixture();
        let source = location("people/ada.json");
        let document = json!({"id": "ada", "born": 1815, "languages": ["en", "fr"]});
        f.store
            .put_object(&source, serde_json::to_vec(&document).unwrap(), None)
            .await
            .unwrap();

        f.service.import_object(&source).await.unwrap();

        let stored = f.records.records(&f.table).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(serde_json::Value::Object(stored[0].attributes().clone()), document);
    }

    #[tokio::test]
    async fn test_missing_object_faults_without_writing() {
        let f = fixture();
        let err = f
            .service
            .import_object(&location("missing.json"))
            .await
            .unwrap_err();

        assert!(matches!(err, HandlerError::Storage(StorageError::ObjectNotFound { .. })));
        assert_eq!(f.records.count(&f.table).await, 0);
    }

    #[tokio::test]
    async fn test_malformed_json_faults() {
        let f = fixture();
        let source = location("broken.json");
        f.store
            .put_object(&source, b"{\"id\": ".to_vec(), None)
            .await
            .unwrap();

        let err = f.service.import_object(&source).await.unwrap_err();
        assert!(matches!(err, HandlerError::Parse(_)));
        assert_eq!(f.records.count(&f.table).await, 0);
    }

    #[tokio::test]
    async fn test_non_object_document_faults() {
        let f = fixture();
        let source = location("list.json");
        f.store
            .put_object(&source, b"[1, 2, 3]".to_vec(), None)
            .await
            .unwrap();

        let err = f.service.import_object(&source).await.unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Validation(ValidationError::RecordNotAnObject { .. })
        ));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let f = fixture_with(InMemoryRecordRepository::with_existing_tables(Vec::<TableName>::new()));
        let source = location("ok.json");
        f.store
            .put_object(&source, b"{}".to_vec(), None)
            .await
            .unwrap();

        let err = f.service.import_object(&source).await.unwrap_err();
        assert!(matches!(
            err,
            HandlerError::RecordStore(RecordStoreError::TableNotFound { .. })
        ));
    }
}
