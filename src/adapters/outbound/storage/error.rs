use crate::domain::{
    errors::StorageError,
    value_objects::{BucketName, ObjectKey},
};

/// Translate an `object_store` failure into a domain storage error.
///
/// `key` is `None` for bucket-level operations (listing), in which case a
/// missing path means the bucket itself is missing.
pub(crate) fn into_storage_error(
    err: object_store::Error,
    bucket: &BucketName,
    key: Option<&ObjectKey>,
    operation: &str,
) -> StorageError {
    match err {
        object_store::Error::NotFound { .. } => match key {
            Some(key) => StorageError::ObjectNotFound {
                bucket: bucket.clone(),
                key: key.clone(),
            },
            None => StorageError::BucketNotFound {
                bucket: bucket.clone(),
            },
        },
        object_store::Error::PermissionDenied { .. }
        | object_store::Error::Unauthenticated { .. } => StorageError::AccessDenied {
            bucket: bucket.clone(),
            operation: operation.to_string(),
        },
        object_store::Error::NotSupported { .. } | object_store::Error::NotImplemented => {
            StorageError::UnsupportedOperation {
                operation: operation.to_string(),
                reason: err.to_string(),
            }
        }
        _ => StorageError::InfrastructureError {
            message: format!("Failed to {} in bucket '{}': {}", operation, bucket, err),
            source: Some(err.to_string()),
        },
    }
}

/// Convert object_store errors raised outside any bucket context (for
/// example while building a client)
impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        StorageError::InfrastructureError {
            message: format!("Object store operation failed: {}", err),
            source: Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> object_store::Error {
        object_store::Error::NotFound {
            path: "videos/x.mp4".to_string(),
            source: "missing".into(),
        }
    }

    #[test]
    fn test_not_found_with_key_is_object_not_found() {
        let bucket = BucketName::new("source-bucket").unwrap();
        let key = ObjectKey::new("videos/x.mp4").unwrap();

        let err = into_storage_error(not_found(), &bucket, Some(&key), "get object");
        assert!(matches!(err, StorageError::ObjectNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "Object not found: s3://source-bucket/videos/x.mp4"
        );
    }

    #[test]
    fn test_not_found_without_key_is_bucket_not_found() {
        let bucket = BucketName::new("source-bucket").unwrap();
        let err = into_storage_error(not_found(), &bucket, None, "list objects");
        assert!(matches!(err, StorageError::BucketNotFound { .. }));
    }

    #[test]
    fn test_other_errors_are_infrastructure() {
        let bucket = BucketName::new("source-bucket").unwrap();
        let err = into_storage_error(
            object_store::Error::Generic {
                store: "S3",
                source: "connection reset".into(),
            },
            &bucket,
            None,
            "list objects",
        );
        assert!(matches!(err, StorageError::InfrastructureError { .. }));
        assert!(err.to_string().contains("connection reset"));
    }
}
