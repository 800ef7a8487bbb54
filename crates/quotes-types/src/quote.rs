//! Quote types

use crate::{Author, NewAuthor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored quote with its author joined in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub content: String,
    /// Nullable foreign key in storage
    pub author: Option<Author>,
    /// Set once by storage at insert time
    pub posted_at: DateTime<Utc>,
}

impl Quote {
    pub fn author_id(&self) -> Option<i64> {
        self.author.as_ref().map(|a| a.id)
    }
}

/// Quote data accepted on input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub content: String,
    pub author: NewAuthor,
}

impl NewQuote {
    pub fn new(content: impl Into<String>, author: NewAuthor) -> Self {
        Self {
            content: content.into(),
            author,
        }
    }
}
