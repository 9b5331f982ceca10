use async_trait::async_trait;
use futures::StreamExt;
use object_store::{
    Attribute, Attributes, ObjectStore as ApacheObjectStore, PutMultipartOptions, PutOptions,
    PutPayload, WriteMultipart, path::Path as ObjectPath,
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::debug;

use super::{
    error::into_storage_error,
    store_factory::{BucketStoreFactory, InMemoryStoreFactory},
};
use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{ContinuationToken, ListingPage, ObjectLocation, ObjectSummary},
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::ObjectStore,
};

/// Adapter that implements our ObjectStore trait using Apache object_store,
/// holding one backend store per bucket
pub struct ApacheObjectStoreAdapter {
    factory: Arc<dyn BucketStoreFactory>,
    stores: RwLock<HashMap<BucketName, Arc<dyn ApacheObjectStore>>>,
    page_size: usize,
}

impl ApacheObjectStoreAdapter {
    /// Matches the S3 `ListObjectsV2` maximum
    pub const DEFAULT_PAGE_SIZE: usize = 1000;

    /// Parts of a cross-bucket copy allowed in flight at once
    const MAX_CONCURRENT_PARTS: usize = 4;

    pub fn new(factory: Arc<dyn BucketStoreFactory>) -> Self {
        Self {
            factory,
            stores: RwLock::new(HashMap::new()),
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// Adapter whose buckets all live in process memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStoreFactory))
    }

    /// Maximum number of objects returned per listing page
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Serve `bucket` from an already constructed store
    pub async fn register_bucket(&self, bucket: BucketName, store: Arc<dyn ApacheObjectStore>) {
        self.stores.write().await.insert(bucket, store);
    }

    async fn store_for(&self, bucket: &BucketName) -> StorageResult<Arc<dyn ApacheObjectStore>> {
        if let Some(store) = self.stores.read().await.get(bucket) {
            return Ok(store.clone());
        }

        let mut stores = self.stores.write().await;
        if let Some(store) = stores.get(bucket) {
            return Ok(store.clone());
        }

        debug!(%bucket, "creating store for bucket");
        let store = self.factory.create_store(bucket)?;
        stores.insert(bucket.clone(), store.clone());
        Ok(store)
    }

    /// Keys are used verbatim, exactly as listings and S3 events name them
    fn object_path(key: &ObjectKey) -> StorageResult<ObjectPath> {
        ObjectPath::parse(key.as_str()).map_err(|e| StorageError::ValidationError {
            message: format!("Invalid object key '{}': {}", key, e),
        })
    }

    /// Stream an object between two bucket stores, keeping its attributes
    async fn copy_between_stores(
        &self,
        source: &ObjectLocation,
        destination: &ObjectLocation,
    ) -> StorageResult<()> {
        let source_store = self.store_for(&source.bucket).await?;
        let destination_store = self.store_for(&destination.bucket).await?;
        let source_path = Self::object_path(&source.key)?;
        let destination_path = Self::object_path(&destination.key)?;

        let source_error = |e: object_store::Error| {
            into_storage_error(e, &source.bucket, Some(&source.key), "copy object")
        };
        let destination_error = |e: object_store::Error| {
            into_storage_error(
                e,
                &destination.bucket,
                Some(&destination.key),
                "copy object",
            )
        };

        let result = source_store.get(&source_path).await.map_err(source_error)?;
        let options = PutMultipartOptions {
            attributes: result.attributes.clone(),
            ..Default::default()
        };
        let upload = destination_store
            .put_multipart_opts(&destination_path, options)
            .await
            .map_err(destination_error)?;

        let mut writer = WriteMultipart::new(upload);
        let mut chunks = result.into_stream();
        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    writer
                        .wait_for_capacity(Self::MAX_CONCURRENT_PARTS)
                        .await
                        .map_err(destination_error)?;
                    writer.put(bytes);
                }
                Err(e) => {
                    if let Err(abort) = writer.abort().await {
                        debug!(error = %abort, "failed to abort partial copy");
                    }
                    return Err(source_error(e));
                }
            }
        }

        writer.finish().await.map_err(destination_error)?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for ApacheObjectStoreAdapter {
    async fn list_page(
        &self,
        bucket: &BucketName,
        continuation: Option<&ContinuationToken>,
    ) -> StorageResult<ListingPage> {
        let store = self.store_for(bucket).await?;

        // The token is the raw location of the last object already returned
        let mut stream = match continuation {
            Some(token) => {
                let offset = ObjectPath::parse(token.as_str()).map_err(|e| {
                    StorageError::ValidationError {
                        message: format!("Invalid continuation token: {}", e),
                    }
                })?;
                store.list_with_offset(None, &offset)
            }
            None => store.list(None),
        };

        let mut objects = Vec::new();
        let mut last_location: Option<ObjectPath> = None;
        let mut has_more = false;

        while let Some(result) = stream.next().await {
            let meta = result.map_err(|e| into_storage_error(e, bucket, None, "list objects"))?;

            if objects.len() == self.page_size {
                has_more = true;
                break;
            }

            let key = ObjectKey::new(meta.location.to_string()).map_err(|e| {
                StorageError::ValidationError {
                    message: format!("Invalid object key from store: {}", e),
                }
            })?;

            objects.push(ObjectSummary {
                key,
                size: meta.size,
                last_modified: meta.last_modified,
                etag: meta.e_tag,
            });
            last_location = Some(meta.location);
        }

        let next_continuation_token = if has_more {
            last_location.map(|location| ContinuationToken::new(location.to_string()))
        } else {
            None
        };

        debug!(
            %bucket,
            objects = objects.len(),
            truncated = has_more,
            "listed page"
        );

        Ok(ListingPage {
            objects,
            next_continuation_token,
        })
    }

    async fn get_object(&self, location: &ObjectLocation) -> StorageResult<Vec<u8>> {
        let store = self.store_for(&location.bucket).await?;
        let path = Self::object_path(&location.key)?;

        let result = store.get(&path).await.map_err(|e| {
            into_storage_error(e, &location.bucket, Some(&location.key), "get object")
        })?;

        let bytes = result.bytes().await.map_err(|e| {
            into_storage_error(e, &location.bucket, Some(&location.key), "read object bytes")
        })?;

        Ok(bytes.to_vec())
    }

    async fn put_object(
        &self,
        location: &ObjectLocation,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> StorageResult<()> {
        let store = self.store_for(&location.bucket).await?;
        let path = Self::object_path(&location.key)?;

        let mut attributes = Attributes::new();
        if let Some(content_type) = content_type {
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
        }
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        store
            .put_opts(&path, PutPayload::from(data), options)
            .await
            .map_err(|e| {
                into_storage_error(e, &location.bucket, Some(&location.key), "put object")
            })?;

        Ok(())
    }

    async fn copy_object(
        &self,
        source: &ObjectLocation,
        destination: &ObjectLocation,
    ) -> StorageResult<()> {
        if source.bucket == destination.bucket {
            let store = self.store_for(&source.bucket).await?;
            return store
                .copy(
                    &Self::object_path(&source.key)?,
                    &Self::object_path(&destination.key)?,
                )
                .await
                .map_err(|e| {
                    into_storage_error(e, &source.bucket, Some(&source.key), "copy object")
                });
        }

        // object_store clients are bound to a single bucket
        self.copy_between_stores(source, destination).await
    }
}
