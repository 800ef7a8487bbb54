//! Error types for the quotes service

use quotes_types::FieldErrors;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuotesError>;

#[derive(Error, Debug)]
pub enum QuotesError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Validation error: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl QuotesError {
    pub fn author_not_found(id: i64) -> Self {
        QuotesError::NotFound {
            resource: "Author",
            id,
        }
    }

    pub fn quote_not_found(id: i64) -> Self {
        QuotesError::NotFound {
            resource: "Quote",
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            QuotesError::author_not_found(42).to_string(),
            "Author not found: 42"
        );
        assert_eq!(
            QuotesError::quote_not_found(7).to_string(),
            "Quote not found: 7"
        );
    }

    #[test]
    fn test_from_field_errors() {
        let mut errors = FieldErrors::new();
        errors.add("first", "Missing data for required field.");
        let err: QuotesError = errors.into();
        assert!(matches!(err, QuotesError::Validation(ref e) if e.len() == 1));
    }
}
