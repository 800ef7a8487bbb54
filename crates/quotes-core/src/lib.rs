//! Quotes Core Library
//!
//! Domain error type and the storage ports the server implements.

// Re-export pure types from quotes-types
pub use quotes_types::*;

pub mod error;
pub mod ports;

pub use error::{QuotesError, Result};
pub use ports::{AuthorStore, QuoteStore};
