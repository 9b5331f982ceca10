// Infrastructure error mapping
pub mod error;

// Storage implementations
pub mod apache_object_store_adapter;
pub mod store_factory;

// Re-export key types
pub use apache_object_store_adapter::ApacheObjectStoreAdapter;
pub use store_factory::{AmazonS3StoreFactory, BucketStoreFactory, InMemoryStoreFactory, S3Settings};
