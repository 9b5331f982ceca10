use crate::domain::errors::ValidationError;

/// A validated record-store table name.
///
/// Follows the DynamoDB naming rules (3-255 characters drawn from
/// `[A-Za-z0-9_.-]`), which also makes the name safe to quote as a SQL
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if value.len() < 3 {
            return Err(ValidationError::TableNameTooShort {
                actual: value.len(),
                min: 3,
            });
        }

        if value.len() > 255 {
            return Err(ValidationError::TableNameTooLong {
                actual: value.len(),
                max: 255,
            });
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '_' | '-' | '.'))
        {
            return Err(ValidationError::TableNameInvalidCharacter(c));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert!(TableName::new("s3todynamodb").is_ok());
        assert!(TableName::new("Media.Records-v2_prod").is_ok());

        assert!(TableName::new("ab").is_err());
        assert!(TableName::new("x".repeat(256)).is_err());
        assert_eq!(
            TableName::new("bad\"name"),
            Err(ValidationError::TableNameInvalidCharacter('"'))
        );
        assert!(TableName::new("with space").is_err());
    }
}
