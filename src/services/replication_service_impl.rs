use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::{
    domain::{errors::HandlerResult, models::ObjectLocation, value_objects::BucketName},
    ports::{services::ReplicationService, storage::ObjectStore},
};

/// Mirrors objects into a fixed destination bucket under their source key
#[derive(Clone)]
pub struct ReplicationServiceImpl {
    store: Arc<dyn ObjectStore>,
    destination_bucket: BucketName,
}

impl ReplicationServiceImpl {
    pub fn new(store: Arc<dyn ObjectStore>, destination_bucket: BucketName) -> Self {
        Self {
            store,
            destination_bucket,
        }
    }

    pub fn destination_bucket(&self) -> &BucketName {
        &self.destination_bucket
    }
}

#[async_trait]
impl ReplicationService for ReplicationServiceImpl {
    #[tracing::instrument(skip(self, source), fields(%source, destination = %self.destination_bucket))]
    async fn replicate_object(&self, source: &ObjectLocation) -> HandlerResult<ObjectLocation> {
        let destination = ObjectLocation::new(self.destination_bucket.clone(), source.key.clone());

        self.store.copy_object(source, &destination).await?;

        info!(%destination, "object replicated");
        Ok(destination)
    }
}
