//! Output projections ("dumps") of stored records
//!
//! Each struct is the exact JSON shape returned to clients. Fields that only
//! exist on output (`id`, `formatted_name`, `posted_at`) live here and never on
//! the load payloads in [`crate::validation`].

use crate::{Author, Quote};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Full author projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDump {
    pub id: i64,
    pub first: String,
    pub last: String,
    pub formatted_name: String,
}

impl From<&Author> for AuthorDump {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            first: author.first.clone(),
            last: author.last.clone(),
            formatted_name: author.formatted_name(),
        }
    }
}

/// Full quote projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDump {
    pub id: i64,
    pub content: String,
    pub author: Option<AuthorDump>,
    #[serde(serialize_with = "serialize_iso8601")]
    pub posted_at: DateTime<Utc>,
}

impl From<&Quote> for QuoteDump {
    fn from(quote: &Quote) -> Self {
        Self {
            id: quote.id,
            content: quote.content.clone(),
            author: quote.author.as_ref().map(AuthorDump::from),
            posted_at: quote.posted_at,
        }
    }
}

/// Restricted projection used when listing quotes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub id: i64,
    pub content: String,
}

impl From<&Quote> for QuoteSummary {
    fn from(quote: &Quote) -> Self {
        Self {
            id: quote.id,
            content: quote.content.clone(),
        }
    }
}

/// ISO-8601 with an explicit `+00:00` offset, e.g. `2024-05-01T09:30:00.123456+00:00`
fn serialize_iso8601<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, false))
}
