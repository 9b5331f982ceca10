use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{RecordStoreError, RecordStoreResult},
        models::Record,
        value_objects::TableName,
    },
    ports::repositories::RecordRepository,
};

/// In-memory implementation of RecordRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemoryRecordRepository {
    data: Arc<RwLock<RepositoryData>>,
}

#[derive(Default)]
struct RepositoryData {
    tables: HashMap<TableName, Vec<Record>>,
    // When set, writes to any other table fail like a missing remote table
    known_tables: Option<HashSet<TableName>>,
}

impl InMemoryRecordRepository {
    /// Repository that accepts writes to any table
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository that only accepts writes to the given tables
    pub fn with_existing_tables(tables: impl IntoIterator<Item = TableName>) -> Self {
        let data = RepositoryData {
            tables: HashMap::new(),
            known_tables: Some(tables.into_iter().collect()),
        };
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// All records written to `table`, in insertion order
    pub async fn records(&self, table: &TableName) -> Vec<Record> {
        self.data
            .read()
            .await
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn count(&self, table: &TableName) -> usize {
        self.data
            .read()
            .await
            .tables
            .get(table)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn put_record(&self, table: &TableName, record: &Record) -> RecordStoreResult<()> {
        let mut data = self.data.write().await;

        if let Some(known) = &data.known_tables {
            if !known.contains(table) {
                return Err(RecordStoreError::TableNotFound {
                    table: table.clone(),
                });
            }
        }

        data.tables
            .entry(table.clone())
            .or_default()
            .push(record.clone());

        Ok(())
    }
}
