//! Uniform response envelope: `{result: ..., status}` on success,
//! `{error: ..., status}` on failure. Callers pick the status; the
//! envelope picks the key.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

pub struct Envelope {
    pub status: StatusCode,
    pub payload: Value,
}

impl Envelope {
    /// Wrap a payload; `status < 400` selects the `result` key, anything
    /// else the `error` key. This is the only rule deciding success/error
    /// shape.
    pub fn wrap(status: StatusCode, payload: Value) -> Self {
        Envelope { status, payload }
    }

    pub fn kind(&self) -> &'static str {
        if self.status.as_u16() < 400 {
            "result"
        } else {
            "error"
        }
    }

    pub fn body(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert(self.kind().to_string(), self.payload.clone());
        map.insert("status".to_string(), json!(self.status.as_u16()));
        Value::Object(map)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let body = self.body();
        (self.status, Json(body)).into_response()
    }
}

/// Location a discovered table is served at: base address + "/" + name.
pub fn derive_location(name: &str, base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), name)
}
