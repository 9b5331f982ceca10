//! Extraction of the object an S3 notification refers to.

use aws_lambda_events::event::s3::S3Event;
use serde_json::{Value, json};
use tracing::warn;

use crate::domain::{
    errors::{HandlerError, HandlerResult},
    models::ObjectLocation,
    value_objects::{BucketName, ObjectKey},
};

/// Location named by `Records[0].s3.bucket.name` / `Records[0].s3.object.key`.
///
/// Only the first record is used; the key is URL-decoded the way S3 encodes
/// it in notifications.
pub fn object_location(event: &S3Event) -> HandlerResult<ObjectLocation> {
    let record = event
        .records
        .first()
        .ok_or_else(|| HandlerError::InvalidEvent("event contains no records".to_string()))?;

    if event.records.len() > 1 {
        warn!(
            ignored = event.records.len() - 1,
            "event carries several records, only the first is processed"
        );
    }

    let bucket = record.s3.bucket.name.as_deref().ok_or_else(|| {
        HandlerError::InvalidEvent("Records[0].s3.bucket.name is missing".to_string())
    })?;
    let key = record.s3.object.key.as_deref().ok_or_else(|| {
        HandlerError::InvalidEvent("Records[0].s3.object.key is missing".to_string())
    })?;

    Ok(ObjectLocation::new(
        BucketName::new(bucket)?,
        ObjectKey::from_event_encoded(key)?,
    ))
}

/// Encode a key the way S3 writes it into event notifications
pub fn encode_event_key(key: &str) -> String {
    urlencoding::encode(key)
        .replace("%2F", "/")
        .replace("%20", "+")
}

/// A minimal `ObjectCreated:Put` notification for `bucket`/`key`, shaped
/// like the events S3 delivers
pub fn object_created_event(bucket: &str, key: &str) -> Value {
    json!({
        "Records": [
            {
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventTime": "1970-01-01T00:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "userIdentity": { "principalId": "LOCAL" },
                "requestParameters": { "sourceIPAddress": "127.0.0.1" },
                "responseElements": {
                    "x-amz-request-id": "LOCAL",
                    "x-amz-id-2": "LOCAL"
                },
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "bucket-relay",
                    "bucket": {
                        "name": bucket,
                        "ownerIdentity": { "principalId": "LOCAL" },
                        "arn": format!("arn:aws:s3:::{}", bucket)
                    },
                    "object": {
                        "key": encode_event_key(key),
                        "size": 0,
                        "eTag": "d41d8cd98f00b204e9800998ecf8427e",
                        "sequencer": "0000000000000000"
                    }
                }
            }
        ]
    })
}
