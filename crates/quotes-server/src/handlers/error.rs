//! Error responses for the HTTP API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quotes_core::{FieldErrors, QuotesError};
use serde_json::json;
use thiserror::Error;

/// Every failure a handler can return, already shaped for the client
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unparsable JSON body
    #[error("{0}")]
    BadRequest(String),

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    NotFound(String),

    /// Details are logged, never sent
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn not_found(resource: &str) -> Self {
        ApiError::NotFound(format!("{} could not be found.", resource))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => json!({ "errors": errors }),
            ApiError::Internal => json!({ "message": "Internal server error." }),
            ApiError::BadRequest(message) | ApiError::NotFound(message) => {
                json!({ "message": message })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<QuotesError> for ApiError {
    fn from(e: QuotesError) -> Self {
        match e {
            QuotesError::NotFound { resource, .. } => ApiError::not_found(resource),
            QuotesError::Validation(errors) => ApiError::Validation(errors),
            QuotesError::Database(_) | QuotesError::Config(_) => {
                tracing::error!("Request failed: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        QuotesError::from(errors).into()
    }
}
