//! Router wiring. Each resource route uses a single any-method handler so
//! the verb switch (and its 405/501 envelopes) lives in one place.

use crate::handlers::{collection, echo, index, item};
use crate::state::AppState;
use axum::{routing::any, Router};

/// Full application surface: index, echo diagnostic, and the generic
/// table routes. The static /echo route shadows a table of the same name.
pub fn app_routes(state: AppState) -> Router {
    Router::new()
        .route("/", any(index))
        .route("/echo", any(echo))
        .route("/:table", any(collection))
        .route("/:table/:id", any(item))
        .with_state(state)
}
