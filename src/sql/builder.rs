//! Builds parameterized SELECT and INSERT statements from catalog metadata.
//!
//! Identifiers (table and column names) are interpolated as quoted text but
//! only ever come from a prior catalog lookup; user-supplied values are
//! always bound parameters. That separation is the injection-safety
//! boundary of the whole crate.

use crate::sql::params::BindValue;
use serde_json::Value;
use std::collections::HashSet;

/// Quote identifier for PostgreSQL (safe: only from catalog output).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn column_list(columns: &[String]) -> String {
    columns.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

/// One statement plus its bound values; `params.len()` always equals the
/// number of `$n` placeholders in `sql`.
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl SqlQuery {
    fn new() -> Self {
        SqlQuery {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// SELECT every row, projecting all catalog columns.
pub fn select_all(table: &str, columns: &[String]) -> SqlQuery {
    let mut q = SqlQuery::new();
    q.sql = format!("SELECT {} FROM {}", column_list(columns), quoted(table));
    q
}

/// SELECT one row by the `id` column.
pub fn select_by_id(table: &str, columns: &[String], id: i64) -> SqlQuery {
    let mut q = SqlQuery::new();
    let n = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        column_list(columns),
        quoted(table),
        quoted("id"),
        n
    );
    q
}

/// SELECT with equality filters ANDed in supplied order. Filter keys not in
/// the catalog column set are dropped here, so an adversarial key never
/// reaches statement text. Zero surviving filters is the same statement as
/// `select_all`.
pub fn select_filtered(table: &str, columns: &[String], filters: &[(String, BindValue)]) -> SqlQuery {
    let mut q = SqlQuery::new();
    let col_names: HashSet<&str> = columns.iter().map(|c| c.as_str()).collect();

    let mut where_parts = Vec::new();
    for (col, val) in filters {
        if col_names.contains(col.as_str()) {
            let n = q.push_param(val.clone());
            where_parts.push(format!("{} = ${}", quoted(col), n));
        }
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{}",
        column_list(columns),
        quoted(table),
        where_clause
    );
    q
}

/// INSERT one row. Inserted columns are the catalog columns present as body
/// keys (catalog order); other body keys are ignored. RETURNING projects all
/// catalog columns so the caller gets the row back with generated fields.
pub fn insert(table: &str, columns: &[String], body: &serde_json::Map<String, Value>) -> SqlQuery {
    let mut q = SqlQuery::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in columns {
        let Some(v) = body.get(c) else { continue };
        let n = q.push_param(BindValue::from_json(v));
        cols.push(quoted(c));
        placeholders.push(format!("${}", n));
    }
    let returning = column_list(columns);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", quoted(table), returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(table),
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn placeholder_count(sql: &str) -> usize {
        (1..)
            .take_while(|n| sql.contains(&format!("${}", n)))
            .count()
    }

    #[test]
    fn select_all_has_no_params() {
        let q = select_all("people", &cols(&["id", "name"]));
        assert_eq!(q.sql, r#"SELECT "id", "name" FROM "people""#);
        assert!(q.params.is_empty());
    }

    #[test]
    fn select_by_id_binds_one_int() {
        let q = select_by_id("people", &cols(&["id", "name"]), 7);
        assert_eq!(q.sql, r#"SELECT "id", "name" FROM "people" WHERE "id" = $1"#);
        assert_eq!(q.params.len(), 1);
        assert!(matches!(q.params[0], BindValue::Int(7)));
    }

    #[test]
    fn filters_bind_in_supplied_order() {
        let filters = vec![
            ("name".to_string(), BindValue::Text("Ada".into())),
            ("userid".to_string(), BindValue::Int(3)),
        ];
        let q = select_filtered("people", &cols(&["id", "name", "userid"]), &filters);
        assert_eq!(
            q.sql,
            r#"SELECT "id", "name", "userid" FROM "people" WHERE "name" = $1 AND "userid" = $2"#
        );
        assert_eq!(q.params.len(), 2);
        assert_eq!(placeholder_count(&q.sql), q.params.len());
    }

    #[test]
    fn zero_filters_matches_select_all() {
        let c = cols(&["id", "name"]);
        assert_eq!(select_filtered("people", &c, &[]).sql, select_all("people", &c).sql);
    }

    #[test]
    fn adversarial_filter_key_never_reaches_sql() {
        let filters = vec![
            (r#"name";DROP TABLE people;--"#.to_string(), BindValue::Text("x".into())),
            ("name".to_string(), BindValue::Text("Ada".into())),
        ];
        let q = select_filtered("people", &cols(&["id", "name"]), &filters);
        assert!(!q.sql.contains("DROP"));
        assert_eq!(q.sql, r#"SELECT "id", "name" FROM "people" WHERE "name" = $1"#);
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn unknown_filter_keys_are_dropped_not_errored() {
        let filters = vec![("bogus".to_string(), BindValue::Text("x".into()))];
        let q = select_filtered("people", &cols(&["id", "name"]), &filters);
        assert!(q.params.is_empty());
        assert!(!q.sql.contains("WHERE"));
    }

    #[test]
    fn insert_takes_only_catalog_columns_in_catalog_order() {
        let body = json!({"name": "Ada", "extra": 1, "age": 36});
        let q = insert(
            "people",
            &cols(&["id", "age", "name"]),
            body.as_object().unwrap(),
        );
        assert_eq!(
            q.sql,
            r#"INSERT INTO "people" ("age", "name") VALUES ($1, $2) RETURNING "id", "age", "name""#
        );
        assert_eq!(q.params.len(), 2);
        assert_eq!(placeholder_count(&q.sql), q.params.len());
    }

    #[test]
    fn empty_body_inserts_defaults() {
        let body = serde_json::Map::new();
        let q = insert("people", &cols(&["id", "name"]), &body);
        assert_eq!(
            q.sql,
            r#"INSERT INTO "people" DEFAULT VALUES RETURNING "id", "name""#
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn identifiers_are_quote_escaped() {
        let q = select_all(r#"odd"name"#, &cols(&["id"]));
        assert_eq!(q.sql, r#"SELECT "id" FROM "odd""name""#);
    }
}
