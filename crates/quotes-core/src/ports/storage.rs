//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use quotes_types::{Author, NewAuthor, NewQuote, Quote};

/// Author store
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// All authors, ordered by id
    async fn list_authors(&self) -> Result<Vec<Author>>;
    async fn get_author(&self, id: i64) -> Result<Option<Author>>;
    /// Return the author with exactly this (first, last) pair, creating it
    /// atomically if none exists
    async fn find_or_create_author(&self, author: &NewAuthor) -> Result<Author>;
}

/// Quote store
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// All quotes with their authors, ordered by id
    async fn list_quotes(&self) -> Result<Vec<Quote>>;
    async fn list_quotes_by_author(&self, author_id: i64) -> Result<Vec<Quote>>;
    async fn get_quote(&self, id: i64) -> Result<Option<Quote>>;
    /// Attach the quote to an existing or newly created author and stamp
    /// `posted_at` with the current UTC time, all in one commit
    async fn create_quote(&self, quote: &NewQuote) -> Result<Quote>;
}
