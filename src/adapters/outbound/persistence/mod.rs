pub mod dynamodb_record_repository;
pub mod in_memory_record_repository;
pub mod sql_record_repository;

pub use dynamodb_record_repository::DynamoDbRecordRepository;
pub use in_memory_record_repository::InMemoryRecordRepository;
pub use sql_record_repository::SqlRecordRepository;
