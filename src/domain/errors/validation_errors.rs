/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ObjectKey validation errors
    EmptyObjectKey,
    ObjectKeyTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectKeyCharacter(char),
    ObjectKeyStartsWithSlash,
    ObjectKeyContainsDoubleSlash,

    // BucketName validation errors
    BucketNameTooShort {
        actual: usize,
        min: usize,
    },
    BucketNameTooLong {
        actual: usize,
        max: usize,
    },
    BucketNameInvalidStart,
    BucketNameInvalidEnd,
    BucketNameInvalidCharacter(char),
    BucketNameAdjacentPeriods,
    BucketNameLooksLikeIpAddress,

    // TableName validation errors
    TableNameTooShort {
        actual: usize,
        min: usize,
    },
    TableNameTooLong {
        actual: usize,
        max: usize,
    },
    TableNameInvalidCharacter(char),

    // Report filter validation errors
    EmptyExtension,

    // Record validation errors
    RecordNotAnObject {
        found: &'static str,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ObjectKey errors
            ValidationError::EmptyObjectKey => write!(f, "Object key cannot be empty"),
            ValidationError::ObjectKeyTooLong { actual, max } => {
                write!(f, "Object key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectKeyCharacter(c) => {
                write!(f, "Invalid character in object key: '{}'", c.escape_default())
            }
            ValidationError::ObjectKeyStartsWithSlash => {
                write!(f, "Object key cannot start with '/'")
            }
            ValidationError::ObjectKeyContainsDoubleSlash => {
                write!(f, "Object key cannot contain '//'")
            }

            // BucketName errors
            ValidationError::BucketNameTooShort { actual, min } => {
                write!(
                    f,
                    "Bucket name too short: {} characters (min: {})",
                    actual, min
                )
            }
            ValidationError::BucketNameTooLong { actual, max } => {
                write!(
                    f,
                    "Bucket name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::BucketNameInvalidStart => {
                write!(f, "Bucket name must start with lowercase letter or number")
            }
            ValidationError::BucketNameInvalidEnd => {
                write!(f, "Bucket name must end with lowercase letter or number")
            }
            ValidationError::BucketNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in bucket name: '{}'. Only lowercase letters, numbers, dots and hyphens allowed",
                    c
                )
            }
            ValidationError::BucketNameAdjacentPeriods => {
                write!(f, "Bucket name cannot contain adjacent periods")
            }
            ValidationError::BucketNameLooksLikeIpAddress => {
                write!(f, "Bucket name cannot be formatted as an IP address")
            }

            // TableName errors
            ValidationError::TableNameTooShort { actual, min } => {
                write!(
                    f,
                    "Table name too short: {} characters (min: {})",
                    actual, min
                )
            }
            ValidationError::TableNameTooLong { actual, max } => {
                write!(
                    f,
                    "Table name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::TableNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in table name: '{}'. Only letters, numbers, '_', '-' and '.' allowed",
                    c
                )
            }

            ValidationError::EmptyExtension => {
                write!(f, "Report extension filter cannot be empty")
            }

            ValidationError::RecordNotAnObject { found } => {
                write!(f, "Record must be a JSON object, found {}", found)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
