//! Shared application state for all routes.

use crate::catalog::SchemaCatalog;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub catalog: SchemaCatalog,
    /// External base address used to derive resource locations.
    pub base_url: String,
}
