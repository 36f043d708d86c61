//! Generic resource execution against PostgreSQL.
//!
//! Every entry point re-derives schema state from the catalog and validates
//! the requested table before any statement text mentions it. Holds no
//! state of its own; safe to call from any number of concurrent requests.

use crate::catalog::SchemaCatalog;
use crate::error::AppError;
use crate::response::derive_location;
use crate::sql::{insert, select_by_id, select_filtered, BindValue, SqlQuery};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;

/// Discovery record for the index listing.
#[derive(Serialize, Debug, PartialEq)]
pub struct Resource {
    pub name: String,
    pub location: String,
}

pub struct Dispatcher;

impl Dispatcher {
    /// Every table as a discoverable resource with a derived location.
    pub async fn list_resources(
        pool: &PgPool,
        catalog: &SchemaCatalog,
        base_url: &str,
    ) -> Result<Vec<Resource>, AppError> {
        let tables = catalog.list_tables(pool).await?;
        Ok(tables
            .into_iter()
            .map(|name| {
                let location = derive_location(&name, base_url);
                Resource { name, location }
            })
            .collect())
    }

    /// Collection fetch with optional equality filters. Zero matching rows
    /// is an empty vec, not an error.
    pub async fn list_rows(
        pool: &PgPool,
        catalog: &SchemaCatalog,
        table: &str,
        filters: &[(String, BindValue)],
    ) -> Result<Vec<Value>, AppError> {
        if !catalog.table_exists(pool, table).await? {
            return Err(AppError::invalid_resource(table));
        }
        let columns = catalog.list_columns(pool, table).await?;
        let q = select_filtered(table, &columns, filters);
        Self::query_many(pool, &q).await
    }

    /// Single-row fetch by id. Missing row is a 404, never an empty list.
    pub async fn fetch_row(
        pool: &PgPool,
        catalog: &SchemaCatalog,
        table: &str,
        id: i64,
    ) -> Result<Value, AppError> {
        if !catalog.table_exists(pool, table).await? {
            return Err(AppError::invalid_resource(table));
        }
        let columns = catalog.list_columns(pool, table).await?;
        let q = select_by_id(table, &columns, id);
        Self::query_optional(pool, &q)
            .await?
            .ok_or_else(|| AppError::NotFound("Not Found".into()))
    }

    /// Insert one row; returns the stored row including generated fields.
    pub async fn create_row(
        pool: &PgPool,
        catalog: &SchemaCatalog,
        table: &str,
        body: &serde_json::Map<String, Value>,
    ) -> Result<Value, AppError> {
        if !catalog.table_exists(pool, table).await? {
            return Err(AppError::invalid_resource(table));
        }
        let columns = catalog.list_columns(pool, table).await?;
        let q = insert(table, &columns, body);
        Self::query_optional(pool, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn query_many(pool: &PgPool, q: &SqlQuery) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let rows = query.fetch_all(pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn query_optional(pool: &PgPool, q: &SqlQuery) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let row = query.fetch_optional(pool).await?;
        Ok(row.map(|r| row_to_json(&r)))
    }
}

/// Decode a row into a JSON object without static knowledge of its types.
fn row_to_json(row: &sqlx::postgres::PgRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &sqlx::postgres::PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f32>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n as f64) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(u)) = row.try_get::<Option<uuid::Uuid>, _>(name) {
        return Value::String(u.to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<serde_json::Value>, _>(name) {
        return j;
    }
    Value::Null
}
