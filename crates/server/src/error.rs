//! Facade errors and their HTTP rendering.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::StoreError;
use serde_json::json;

/// Message returned to callers whenever the catalog cannot be read.
///
/// Storage details are logged, never sent over the wire.
pub const CATALOG_UNREADABLE: &str = "could not read recipes";

/// Errors surfaced by the facade.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("could not read recipes: {0}")]
    CatalogRead(#[from] StoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,
}

impl ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::CatalogRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ServiceError::CatalogRead(_) => "INTERNAL_ERROR",
            ServiceError::BadRequest(_) => "BAD_REQUEST",
            ServiceError::NotFound => "NOT_FOUND",
        }
    }

    /// The caller-facing message, without any storage internals.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::CatalogRead(_) => CATALOG_UNREADABLE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.public_message(),
            }
        }));

        (self.status_code(), body).into_response()
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::BadRequest(rejection.body_text())
    }
}
