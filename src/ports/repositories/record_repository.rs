use crate::domain::{errors::RecordStoreResult, models::Record, value_objects::TableName};
use async_trait::async_trait;

/// Repository for the table-oriented record store fed by the importer
#[async_trait]
pub trait RecordRepository: Send + Sync + 'static {
    /// Insert one record into `table`. Existing items are not consulted.
    async fn put_record(&self, table: &TableName, record: &Record) -> RecordStoreResult<()>;
}
