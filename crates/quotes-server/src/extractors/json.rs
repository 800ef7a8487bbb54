//! JSON body extractor
//!
//! Parses the body as JSON regardless of `Content-Type` and rejects bodies
//! that carry no data, leaving field-level checks to the payload loaders.

use crate::handlers::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use quotes_core::validation::is_blank;
use serde_json::Value;

pub const INVALID_JSON: &str = "Invalid JSON format.";
pub const NO_INPUT: &str = "No input data provided.";

/// Raw, non-empty JSON document from the request body
#[derive(Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Failed to read request body: {}", e);
            ApiError::BadRequest(INVALID_JSON.to_string())
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ApiError::BadRequest(NO_INPUT.to_string()));
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!("Rejecting malformed JSON body: {}", e);
            ApiError::BadRequest(INVALID_JSON.to_string())
        })?;

        if is_blank(&value) {
            return Err(ApiError::BadRequest(NO_INPUT.to_string()));
        }

        Ok(Self(value))
    }
}
