//! Error responses
//!
//! Every failure a handler can produce maps onto one of a closed set of
//! categories, rendered as `{"error": "<message>"}`. Storage errors are
//! logged and never echoed to the client.

use crate::storage::StoreError;
use axum::{
    extract::rejection::{FormRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cafe_types::FieldError;
use serde_json::json;
use thiserror::Error;

pub const NO_SUCH_CAFE: &str = "No cafe record exists with that ID.";
pub const NO_CAFE_AT_LOCATION: &str =
    "Not Found: We don't have a cafe registered to this location.";
pub const NO_CAFES_YET: &str = "No cafes are registered yet.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Please enter the valid API key to remove the cafe.")]
    Forbidden,

    #[error("A cafe with that name already exists.")]
    DuplicateName,

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error.")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::DuplicateName => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateName(name) => {
                tracing::info!("Rejected duplicate cafe name: {}", name);
                ApiError::DuplicateName
            }
            StoreError::Sqlx(e) => {
                tracing::error!("Database error: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl From<FieldError> for ApiError {
    fn from(e: FieldError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

pub const MALFORMED_QUERY: &str = "Malformed query string.";
pub const MALFORMED_FORM: &str = "Expected a form-encoded body.";

// Parameter structs hold only optional strings, so a rejection means the
// request could not be decoded at all. Handlers name missing parameters.
impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", e.body_text());
        ApiError::BadRequest(MALFORMED_QUERY.to_string())
    }
}

impl From<FormRejection> for ApiError {
    fn from(e: FormRejection) -> Self {
        tracing::debug!("Rejected form body: {}", e.body_text());
        ApiError::BadRequest(MALFORMED_FORM.to_string())
    }
}
