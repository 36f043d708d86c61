//! Bind values for PostgreSQL and coercion of raw query-parameter strings.

use crate::error::AppError;
use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

/// A value that can be bound to a PostgreSQL query.
#[derive(Clone, Debug)]
pub enum BindValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(uuid::Uuid),
    Json(Value),
}

impl BindValue {
    /// Map a JSON body value to a bindable value. Strings that parse as
    /// UUIDs bind as uuid; arrays and objects bind as jsonb.
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => BindValue::Null,
            Value::Bool(b) => BindValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    BindValue::Int(i)
                } else {
                    BindValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::String(s) => {
                if let Ok(u) = uuid::Uuid::parse_str(s) {
                    BindValue::Uuid(u)
                } else {
                    BindValue::Text(s.clone())
                }
            }
            Value::Array(_) | Value::Object(_) => BindValue::Json(v.clone()),
        }
    }
}

/// Coerce a raw query-parameter value for binding. A key ending in the
/// literal suffix "id" (case-sensitive) is parsed as a base-10 integer;
/// everything else stays a string.
///
/// This is a deliberately crude naming heuristic standing in for real
/// column-type introspection. Its false positives are part of the
/// contract: a text column named e.g. `orchid` is still coerced, and a
/// non-numeric value for such a key is a client error, not a crash.
pub fn coerce(key: &str, raw: &str) -> Result<BindValue, AppError> {
    if key.ends_with("id") {
        let n: i64 = raw
            .parse()
            .map_err(|_| AppError::BadRequest(format!("expected an integer for '{}', got '{}'", key, raw)))?;
        Ok(BindValue::Int(n))
    } else {
        Ok(BindValue::Text(raw.to_string()))
    }
}

impl<'q> Encode<'q, Postgres> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            BindValue::Null => <Option<i32> as Encode<Postgres>>::encode_by_ref(&None, buf)?,
            BindValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf)?,
            BindValue::Int(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            BindValue::Float(n) => <f64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            BindValue::Text(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)?
            }
            BindValue::Uuid(u) => <uuid::Uuid as Encode<Postgres>>::encode_by_ref(u, buf)?,
            BindValue::Json(v) => <serde_json::Value as Encode<Postgres>>::encode_by_ref(v, buf)?,
        })
    }

    // Without per-value type info every parameter would be sent as TEXT and
    // integer comparisons against int columns would need SQL casts.
    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            BindValue::Null => PgTypeInfo::with_name("TEXT"),
            BindValue::Bool(_) => PgTypeInfo::with_name("BOOL"),
            BindValue::Int(_) => PgTypeInfo::with_name("INT8"),
            BindValue::Float(_) => PgTypeInfo::with_name("FLOAT8"),
            BindValue::Text(_) => PgTypeInfo::with_name("TEXT"),
            BindValue::Uuid(_) => PgTypeInfo::with_name("UUID"),
            BindValue::Json(_) => PgTypeInfo::with_name("JSONB"),
        })
    }
}

impl sqlx::Type<Postgres> for BindValue {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_suffix_parses_as_integer() {
        assert!(matches!(coerce("userid", "42"), Ok(BindValue::Int(42))));
        assert!(matches!(coerce("id", "7"), Ok(BindValue::Int(7))));
    }

    #[test]
    fn non_id_keys_stay_strings() {
        match coerce("name", "42") {
            Ok(BindValue::Text(s)) => assert_eq!(s, "42"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        // "userID" does not end in lowercase "id".
        assert!(matches!(coerce("userID", "abc"), Ok(BindValue::Text(_))));
    }

    #[test]
    fn false_positive_suffix_is_still_coerced() {
        // A genuinely textual column whose name happens to end in "id".
        assert!(matches!(coerce("orchid", "9"), Ok(BindValue::Int(9))));
    }

    #[test]
    fn non_numeric_id_value_is_bad_request() {
        match coerce("userid", "abc") {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("userid")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn from_json_maps_scalar_kinds() {
        assert!(matches!(BindValue::from_json(&json!(null)), BindValue::Null));
        assert!(matches!(BindValue::from_json(&json!(true)), BindValue::Bool(true)));
        assert!(matches!(BindValue::from_json(&json!(3)), BindValue::Int(3)));
        assert!(matches!(BindValue::from_json(&json!(1.5)), BindValue::Float(_)));
        assert!(matches!(BindValue::from_json(&json!("Ada")), BindValue::Text(_)));
        assert!(matches!(
            BindValue::from_json(&json!("b4b9f1f0-5e0a-4d9a-9a6b-2f8f4f1b6c2d")),
            BindValue::Uuid(_)
        ));
        assert!(matches!(BindValue::from_json(&json!([1])), BindValue::Json(_)));
    }
}
