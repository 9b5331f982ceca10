use object_store::{ObjectStore as ApacheObjectStore, aws::AmazonS3Builder, memory::InMemory};
use std::sync::Arc;

use crate::domain::{errors::StorageResult, value_objects::BucketName};

/// Creates the backend store that serves a single bucket.
///
/// `object_store` binds one client to one bucket, so the adapter asks the
/// factory for a store the first time each bucket is touched.
pub trait BucketStoreFactory: Send + Sync + 'static {
    fn create_store(&self, bucket: &BucketName) -> StorageResult<Arc<dyn ApacheObjectStore>>;
}

/// Every bucket gets its own empty in-process store
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryStoreFactory;

impl BucketStoreFactory for InMemoryStoreFactory {
    fn create_store(&self, _bucket: &BucketName) -> StorageResult<Arc<dyn ApacheObjectStore>> {
        Ok(Arc::new(InMemory::new()))
    }
}

/// Connection settings shared by every S3 bucket client
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct S3Settings {
    #[builder(into, default = "us-east-1".to_string())]
    pub region: String,
    /// Custom endpoint for S3-compatible services such as MinIO
    #[builder(into)]
    pub endpoint: Option<String>,
    #[builder(into)]
    pub access_key: Option<String>,
    #[builder(into)]
    pub secret_key: Option<String>,
    #[builder(default)]
    pub allow_http: bool,
}

/// Builds Amazon S3 clients. Credentials not given explicitly are taken
/// from the standard `AWS_*` environment (including the session token a
/// Lambda execution role provides).
#[derive(Debug, Clone)]
pub struct AmazonS3StoreFactory {
    settings: S3Settings,
}

impl AmazonS3StoreFactory {
    pub fn new(settings: S3Settings) -> Self {
        Self { settings }
    }
}

impl BucketStoreFactory for AmazonS3StoreFactory {
    fn create_store(&self, bucket: &BucketName) -> StorageResult<Arc<dyn ApacheObjectStore>> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(bucket.as_str())
            .with_region(&self.settings.region)
            .with_allow_http(self.settings.allow_http);

        if let Some(endpoint) = &self.settings.endpoint {
            builder = builder.with_endpoint(endpoint);
        }

        if let (Some(access_key), Some(secret_key)) =
            (&self.settings.access_key, &self.settings.secret_key)
        {
            builder = builder
                .with_access_key_id(access_key)
                .with_secret_access_key(secret_key);
        }

        let store = builder.build()?;
        Ok(Arc::new(store))
    }
}
