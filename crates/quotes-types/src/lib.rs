//! Quotes Types - Pure type definitions
//!
//! Records as stored, payloads as loaded from request JSON, and the
//! projections dumped back out. Nothing here touches a runtime or a database.

pub mod author;
pub mod quote;
pub mod schema;
pub mod validation;

pub use author::*;
pub use quote::*;
pub use schema::*;
pub use validation::{FieldError, FieldErrors};

/// Maximum length of an author's first or last name (matches the column width)
pub const MAX_NAME_LEN: usize = 80;
