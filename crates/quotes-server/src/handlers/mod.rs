//! HTTP handlers

pub mod authors;
pub mod error;
pub mod health;
pub mod quotes;

pub use error::ApiError;
pub use health::health;

/// Path ids that are not integers cannot name a record
fn parse_id(raw: &str, resource: &'static str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::not_found(resource))
}
