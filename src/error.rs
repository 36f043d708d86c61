//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Not Implemented")]
    NotImplemented,
    #[error("{0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    /// 404 with the message clients key on for an unknown table.
    pub fn invalid_resource(table: &str) -> Self {
        AppError::NotFound(format!("{} is not a valid resource.", table))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            // DB failures are availability failures from the client's view.
            AppError::Db(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        crate::response::Envelope::wrap(status, serde_json::Value::String(self.to_string()))
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(AppError::NotImplemented.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(
            AppError::Db(sqlx::Error::PoolClosed).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn invalid_resource_names_the_table() {
        let e = AppError::invalid_resource("people");
        assert_eq!(e.to_string(), "people is not a valid resource.");
    }
}
