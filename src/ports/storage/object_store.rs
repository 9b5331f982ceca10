use crate::domain::{
    errors::StorageResult,
    models::{ContinuationToken, ListingPage, ObjectLocation},
    value_objects::BucketName,
};
use async_trait::async_trait;

/// Port for object storage operations across buckets
/// This abstracts the actual storage backend (S3, in-memory, etc.)
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Fetch one page of a bucket listing.
    ///
    /// Pass `None` to start from the beginning and the previous page's
    /// `next_continuation_token` to resume. Objects come back in key order.
    async fn list_page(
        &self,
        bucket: &BucketName,
        continuation: Option<&ContinuationToken>,
    ) -> StorageResult<ListingPage>;

    /// Retrieve object data
    async fn get_object(&self, location: &ObjectLocation) -> StorageResult<Vec<u8>>;

    /// Store object data, replacing any existing object at the location
    async fn put_object(
        &self,
        location: &ObjectLocation,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> StorageResult<()>;

    /// Copy an object to another location, possibly in another bucket
    async fn copy_object(
        &self,
        source: &ObjectLocation,
        destination: &ObjectLocation,
    ) -> StorageResult<()>;
}
