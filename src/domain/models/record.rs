use serde_json::{Map, Value};

use crate::domain::errors::ValidationError;

/// A single item destined for a record-store table: the top-level fields of
/// one JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Value> for Record {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(ValidationError::RecordNotAnObject { found: "null" }),
            Value::Bool(_) => Err(ValidationError::RecordNotAnObject { found: "a boolean" }),
            Value::Number(_) => Err(ValidationError::RecordNotAnObject { found: "a number" }),
            Value::String(_) => Err(ValidationError::RecordNotAnObject { found: "a string" }),
            Value::Array(_) => Err(ValidationError::RecordNotAnObject { found: "an array" }),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_becomes_record() {
        let record = Record::try_from(json!({"id": "42", "tags": ["a", "b"]})).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.attributes()["id"], json!("42"));
    }

    #[test]
    fn test_non_objects_rejected() {
        assert_eq!(
            Record::try_from(json!([1, 2])),
            Err(ValidationError::RecordNotAnObject { found: "an array" })
        );
        assert!(Record::try_from(json!("text")).is_err());
        assert!(Record::try_from(Value::Null).is_err());
    }
}
