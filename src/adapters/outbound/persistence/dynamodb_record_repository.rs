use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue};
use serde_json::Value;
use std::collections::HashMap;

use crate::{
    domain::{
        errors::{RecordStoreError, RecordStoreResult},
        models::Record,
        value_objects::TableName,
    },
    ports::repositories::RecordRepository,
};

/// DynamoDB implementation of RecordRepository: each record becomes one
/// item whose attributes are the record's top-level fields
#[derive(Debug, Clone)]
pub struct DynamoDbRecordRepository {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoDbRecordRepository {
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS configuration chain, optionally
    /// pointed at a local endpoint such as DynamoDB Local
    pub async fn from_env(region: &str, endpoint: Option<&str>) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self::new(aws_sdk_dynamodb::Client::from_conf(builder.build()))
    }
}

/// Map a JSON value onto the DynamoDB attribute model
pub fn to_attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attribute_value).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), to_attribute_value(value)))
                .collect(),
        ),
    }
}

/// Item attributes for `record`
pub fn to_item(record: &Record) -> HashMap<String, AttributeValue> {
    record
        .attributes()
        .iter()
        .map(|(name, value)| (name.clone(), to_attribute_value(value)))
        .collect()
}

#[async_trait]
impl RecordRepository for DynamoDbRecordRepository {
    #[tracing::instrument(skip(self, record), fields(attributes = record.len()))]
    async fn put_record(&self, table: &TableName, record: &Record) -> RecordStoreResult<()> {
        self.client
            .put_item()
            .table_name(table.as_str())
            .set_item(Some(to_item(record)))
            .send()
            .await
            .map_err(|e| {
                let missing_table = e
                    .as_service_error()
                    .is_some_and(|service| service.is_resource_not_found_exception());
                if missing_table {
                    RecordStoreError::TableNotFound {
                        table: table.clone(),
                    }
                } else {
                    let detail = DisplayErrorContext(&e).to_string();
                    RecordStoreError::InfrastructureError {
                        message: format!("DynamoDB PutItem failed: {}", detail),
                        source: Some(detail),
                    }
                }
            })?;

        Ok(())
    }
}
