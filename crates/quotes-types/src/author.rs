//! Author types

use serde::{Deserialize, Serialize};

/// A stored author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub first: String,
    pub last: String,
}

impl Author {
    pub fn new(id: i64, first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            id,
            first: first.into(),
            last: last.into(),
        }
    }

    /// "last, first" - derived, never persisted
    pub fn formatted_name(&self) -> String {
        format!("{}, {}", self.last, self.first)
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}

/// Author data accepted on input; identity is always assigned by storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub first: String,
    pub last: String,
}

impl NewAuthor {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_name() {
        let author = Author::new(1, "Ada", "Lovelace");
        assert_eq!(author.formatted_name(), "Lovelace, Ada");
        assert_eq!(author.to_string(), "Ada Lovelace");
    }
}
