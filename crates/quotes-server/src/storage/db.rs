//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use quotes_core::{Author, AuthorStore, NewAuthor, NewQuote, Quote, QuoteStore, QuotesError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
}

const SELECT_QUOTES: &str = r#"
    SELECT q.id, q.content, q.posted_at,
           a.id AS author_id, a.first AS author_first, a.last AS author_last
    FROM quote q
    LEFT JOIN author a ON a.id = q.author_id
"#;

impl Database {
    /// Open (or create) the database file at `database_path`
    pub async fn open(database_path: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::from_pool(pool).await
    }

    /// A private in-memory database, one per call
    pub async fn in_memory() -> Result<Self> {
        // Every connection to :memory: is its own database, so pin the pool to one
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        tracing::info!("SQLite connection established, creating tables...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to create database tables")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Authors are unique per name pair; find-or-create relies on it
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS author (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first VARCHAR(80) NOT NULL,
                last VARCHAR(80) NOT NULL,
                UNIQUE (first, last)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quote (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                author_id INTEGER REFERENCES author (id),
                posted_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_quote_author_id ON quote (author_id)
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Cheap round-trip used by the health check
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&*self.pool).await?;
        Ok(())
    }

    // Must run inside the caller's transaction
    async fn find_or_create_author_in(
        conn: &mut SqliteConnection,
        author: &NewAuthor,
    ) -> std::result::Result<Author, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO author (first, last) VALUES (?1, ?2)
            ON CONFLICT (first, last) DO NOTHING
            "#,
        )
        .bind(&author.first)
        .bind(&author.last)
        .execute(&mut *conn)
        .await?;

        let row: AuthorRow = sqlx::query_as(
            r#"
            SELECT id, first, last FROM author WHERE first = ?1 AND last = ?2
            "#,
        )
        .bind(&author.first)
        .bind(&author.last)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row.into())
    }
}

fn db_err(e: sqlx::Error) -> QuotesError {
    QuotesError::Database(e.to_string())
}

#[async_trait]
impl AuthorStore for Database {
    async fn list_authors(&self) -> quotes_core::Result<Vec<Author>> {
        let rows: Vec<AuthorRow> = sqlx::query_as(
            r#"
            SELECT id, first, last FROM author ORDER BY id
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_author(&self, id: i64) -> quotes_core::Result<Option<Author>> {
        let row: Option<AuthorRow> = sqlx::query_as(
            r#"
            SELECT id, first, last FROM author WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_or_create_author(&self, author: &NewAuthor) -> quotes_core::Result<Author> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let author = Self::find_or_create_author_in(&mut *tx, author)
            .await
            .map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;

        Ok(author)
    }
}

#[async_trait]
impl QuoteStore for Database {
    async fn list_quotes(&self) -> quotes_core::Result<Vec<Quote>> {
        let rows: Vec<QuoteRow> = sqlx::query_as(&format!("{SELECT_QUOTES} ORDER BY q.id"))
            .fetch_all(&*self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_quotes_by_author(&self, author_id: i64) -> quotes_core::Result<Vec<Quote>> {
        let rows: Vec<QuoteRow> = sqlx::query_as(&format!(
            "{SELECT_QUOTES} WHERE q.author_id = ?1 ORDER BY q.id"
        ))
        .bind(author_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_quote(&self, id: i64) -> quotes_core::Result<Option<Quote>> {
        let row: Option<QuoteRow> = sqlx::query_as(&format!("{SELECT_QUOTES} WHERE q.id = ?1"))
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(db_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn create_quote(&self, quote: &NewQuote) -> quotes_core::Result<Quote> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let author = Self::find_or_create_author_in(&mut *tx, &quote.author)
            .await
            .map_err(db_err)?;

        // Stored and dumped at microsecond precision
        let posted_at = Utc::now().trunc_subsecs(6);
        let id = sqlx::query(
            r#"
            INSERT INTO quote (content, author_id, posted_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&quote.content)
        .bind(author.id)
        .bind(posted_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?
        .last_insert_rowid();

        tx.commit().await.map_err(db_err)?;

        Ok(Quote {
            id,
            content: quote.content.clone(),
            author: Some(author),
            posted_at,
        })
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    first: String,
    last: String,
}

impl From<AuthorRow> for Author {
    fn from(r: AuthorRow) -> Self {
        Author {
            id: r.id,
            first: r.first,
            last: r.last,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuoteRow {
    id: i64,
    content: String,
    posted_at: DateTime<Utc>,
    author_id: Option<i64>,
    author_first: Option<String>,
    author_last: Option<String>,
}

impl From<QuoteRow> for Quote {
    fn from(r: QuoteRow) -> Self {
        let author = match (r.author_id, r.author_first, r.author_last) {
            (Some(id), Some(first), Some(last)) => Some(Author { id, first, last }),
            _ => None,
        };

        Quote {
            id: r.id,
            content: r.content,
            author,
            posted_at: r.posted_at,
        }
    }
}
