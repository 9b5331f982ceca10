use chrono::{DateTime, Utc};

use crate::domain::value_objects::{BucketName, ObjectKey};

/// Fully-qualified address of an object: bucket plus key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectLocation {
    pub bucket: BucketName,
    pub key: ObjectKey,
}

impl ObjectLocation {
    pub fn new(bucket: BucketName, key: ObjectKey) -> Self {
        Self { bucket, key }
    }
}

impl std::fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Descriptor of one object as returned by a listing call
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSummary {
    pub key: ObjectKey,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub etag: Option<String>,
}

/// Opaque marker telling the store where the next listing page starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One bounded batch of a paginated listing
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    pub objects: Vec<ObjectSummary>,
    pub next_continuation_token: Option<ContinuationToken>,
}
