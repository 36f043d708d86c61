//! Index listing and the /echo diagnostic.

use crate::error::AppError;
use crate::response::Envelope;
use crate::service::Dispatcher;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET / lists every table as a discoverable resource. Any other verb on
/// the base route is unimplemented rather than disallowed.
pub async fn index(
    State(state): State<AppState>,
    method: Method,
) -> Result<Response, AppError> {
    match method {
        Method::GET => {
            let resources =
                Dispatcher::list_resources(&state.pool, &state.catalog, &state.base_url).await?;
            Ok(Envelope::wrap(StatusCode::OK, json!({ "resources": resources })).into_response())
        }
        _ => Err(AppError::NotImplemented),
    }
}

/// Echoes the normalized request back as text. Introspection aid only; not
/// part of the resource model.
pub async fn echo(method: Method, uri: Uri, body: Bytes) -> Response {
    let dump = format!(
        "method: {}\nuri: {}\nquery: {}\nbody: {}\n",
        method,
        uri.path(),
        uri.query().unwrap_or(""),
        String::from_utf8_lossy(&body),
    );
    (StatusCode::OK, dump).into_response()
}
