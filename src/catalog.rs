//! Live schema discovery from `information_schema`. No caching: every call
//! reflects the current state of the database.

use crate::error::AppError;
use sqlx::{PgPool, Row};

/// Catalog access scoped to one database schema (usually `public`).
/// Holds no connection; callers pass the pool per request.
#[derive(Clone, Debug)]
pub struct SchemaCatalog {
    schema: String,
}

impl SchemaCatalog {
    pub fn new(schema: impl Into<String>) -> Self {
        SchemaCatalog { schema: schema.into() }
    }

    /// All base table names in the configured schema, ordered by name.
    pub async fn list_tables(&self, pool: &PgPool) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = $1 AND table_type = 'BASE TABLE' \
             ORDER BY table_name",
        )
        .bind(&self.schema)
        .fetch_all(pool)
        .await?;
        Ok(rows.iter().map(|r| r.get::<String, _>(0)).collect())
    }

    /// Column names of one table in ordinal order. The table name is passed
    /// as a bind value, never concatenated. Unknown table yields an empty
    /// vec; existence is checked separately.
    pub async fn list_columns(&self, pool: &PgPool, table: &str) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query(
            "SELECT column_name FROM information_schema.columns \
             WHERE table_schema = $1 AND table_name = $2 \
             ORDER BY ordinal_position",
        )
        .bind(&self.schema)
        .bind(table)
        .fetch_all(pool)
        .await?;
        Ok(rows.iter().map(|r| r.get::<String, _>(0)).collect())
    }

    /// The single chokepoint every requested table name must pass before it
    /// is interpolated into any statement text.
    pub async fn table_exists(&self, pool: &PgPool, table: &str) -> Result<bool, AppError> {
        let tables = self.list_tables(pool).await?;
        Ok(tables.iter().any(|t| t == table))
    }
}
