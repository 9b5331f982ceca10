use crate::domain::{errors::HandlerResult, models::ObjectLocation};
use async_trait::async_trait;

/// Port for mirroring objects into the destination bucket
#[async_trait]
pub trait ReplicationService: Send + Sync + 'static {
    /// Copy `source` to the destination bucket under the same key.
    /// Returns where the copy was written.
    async fn replicate_object(&self, source: &ObjectLocation) -> HandlerResult<ObjectLocation>;
}
