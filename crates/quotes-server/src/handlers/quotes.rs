//! Quote handlers

use super::{parse_id, ApiError};
use crate::extractors::JsonBody;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use quotes_core::{NewQuote, QuoteDump, QuoteSummary, QuotesError};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct QuoteListResponse {
    quotes: Vec<QuoteSummary>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    quote: QuoteDump,
}

#[derive(Debug, Serialize)]
pub struct CreateQuoteResponse {
    message: &'static str,
    quote: QuoteDump,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<QuoteListResponse>, ApiError> {
    let quotes = state.quotes.list_quotes().await?;
    Ok(Json(QuoteListResponse {
        quotes: quotes.iter().map(QuoteSummary::from).collect(),
    }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let id = parse_id(&raw_id, "Quote")?;

    let quote = state
        .quotes
        .get_quote(id)
        .await?
        .ok_or_else(|| QuotesError::quote_not_found(id))?;

    Ok(Json(QuoteResponse {
        quote: QuoteDump::from(&quote),
    }))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<CreateQuoteResponse>), ApiError> {
    let new_quote = NewQuote::load(&body)?;

    // Reuses the author when the name pair already exists
    let quote = state.quotes.create_quote(&new_quote).await?;
    info!(
        "Created quote: id={}, author_id={:?}",
        quote.id,
        quote.author_id()
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateQuoteResponse {
            message: "Created new quote.",
            quote: QuoteDump::from(&quote),
        }),
    ))
}
