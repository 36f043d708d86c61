//! Method dispatch for /:table and /:table/:id.
//!
//! One handler per route with an explicit match over the verb, so that
//! unsupported methods produce the same envelope shape as everything else.

use crate::error::AppError;
use crate::response::Envelope;
use crate::service::Dispatcher;
use crate::sql::{coerce, BindValue};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Query params become equality filters; values are coerced by key name
/// before the builder checks the keys against the catalog columns.
fn build_filters(params: Vec<(String, String)>) -> Result<Vec<(String, BindValue)>, AppError> {
    let mut filters = Vec::with_capacity(params.len());
    for (k, v) in params {
        let val = coerce(&k, &v)?;
        filters.push((k, val));
    }
    Ok(filters)
}

fn body_to_map(body: &Bytes) -> Result<serde_json::Map<String, Value>, AppError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))?;
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// GET lists (optionally filtered) rows; POST creates one row.
pub async fn collection(
    State(state): State<AppState>,
    method: Method,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Result<Response, AppError> {
    match method {
        Method::GET => {
            let filters = build_filters(params)?;
            let rows =
                Dispatcher::list_rows(&state.pool, &state.catalog, &table, &filters).await?;
            Ok(Envelope::wrap(StatusCode::OK, Value::Array(rows)).into_response())
        }
        Method::POST => {
            let body = body_to_map(&body)?;
            let row = Dispatcher::create_row(&state.pool, &state.catalog, &table, &body).await?;
            Ok(Envelope::wrap(StatusCode::CREATED, row).into_response())
        }
        _ => Err(AppError::MethodNotAllowed),
    }
}

/// GET fetches one row by id. The id route never returns a sequence: a
/// missing row is a 404.
pub async fn item(
    State(state): State<AppState>,
    method: Method,
    Path((table, id_str)): Path<(String, String)>,
) -> Result<Response, AppError> {
    match method {
        Method::GET => {
            let id: i64 = id_str
                .parse()
                .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))?;
            let row = Dispatcher::fetch_row(&state.pool, &state.catalog, &table, id).await?;
            Ok(Envelope::wrap(StatusCode::OK, row).into_response())
        }
        _ => Err(AppError::MethodNotAllowed),
    }
}
