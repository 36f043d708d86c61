//! Schemarest: schema-driven REST API over any PostgreSQL database.
//!
//! Tables and columns are discovered per request from `information_schema`;
//! nothing is generated ahead of time and nothing is cached.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use catalog::SchemaCatalog;
pub use config::Config;
pub use error::AppError;
pub use response::{derive_location, Envelope};
pub use routes::app_routes;
pub use service::Dispatcher;
pub use state::AppState;
