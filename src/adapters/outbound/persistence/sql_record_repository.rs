use async_trait::async_trait;
use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use crate::{
    domain::{
        errors::{RecordStoreError, RecordStoreResult},
        models::Record,
        value_objects::TableName,
    },
    ports::repositories::RecordRepository,
};

/// PostgreSQL SQLSTATE for a missing relation
const UNDEFINED_TABLE: &str = "42P01";

/// SQL-based implementation of RecordRepository using PostgreSQL.
///
/// Each record table maps to a Postgres table of the same name holding one
/// `JSONB` document per record.
#[derive(Clone)]
pub struct SqlRecordRepository {
    pool: PgPool,
}

impl SqlRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `connection_string`
    pub async fn connect(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect(connection_string).await?;
        Ok(Self::new(pool))
    }

    /// Create the backing table for `table` if it does not exist
    pub async fn migrate(&self, table: &TableName) -> Result<(), sqlx::Error> {
        let table_ident = quoted(table);
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table_ident} (
                id UUID PRIMARY KEY,
                item JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Table names are restricted to `[A-Za-z0-9_.-]`, so double quoting is
/// enough to make them a safe identifier
fn quoted(table: &TableName) -> String {
    format!("\"{}\"", table.as_str())
}

#[async_trait]
impl RecordRepository for SqlRecordRepository {
    async fn put_record(&self, table: &TableName, record: &Record) -> RecordStoreResult<()> {
        sqlx::query(&format!(
            "INSERT INTO {} (id, item) VALUES ($1, $2)",
            quoted(table)
        ))
        .bind(Uuid::new_v4())
        .bind(Json(record.attributes()))
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNDEFINED_TABLE) => {
                RecordStoreError::TableNotFound {
                    table: table.clone(),
                }
            }
            _ => RecordStoreError::InfrastructureError {
                message: format!("Database error storing record: {}", e),
                source: Some(e.to_string()),
            },
        })?;

        Ok(())
    }
}
