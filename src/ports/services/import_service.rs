use crate::domain::{errors::HandlerResult, models::ObjectLocation};
use async_trait::async_trait;

/// Port for importing JSON documents into the record store
#[async_trait]
pub trait ImportService: Send + Sync + 'static {
    /// Read the JSON object at `source` and store it as one record
    async fn import_object(&self, source: &ObjectLocation) -> HandlerResult<()>;
}
