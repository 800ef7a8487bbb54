//! Author handlers

use super::{parse_id, ApiError};
use crate::extractors::JsonBody;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use quotes_core::{AuthorDump, NewAuthor, QuoteSummary, QuotesError};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct CreateAuthorResponse {
    message: &'static str,
    authors: Vec<AuthorDump>,
}

#[derive(Debug, Serialize)]
pub struct AuthorListResponse {
    authors: Vec<AuthorDump>,
}

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    author: AuthorDump,
    quotes: Vec<QuoteSummary>,
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<CreateAuthorResponse>, ApiError> {
    let new_author = NewAuthor::load(&body)?;

    let author = state.authors.find_or_create_author(&new_author).await?;
    info!("Author ready: id={}, name={}", author.id, author);

    let authors = state.authors.list_authors().await?;
    Ok(Json(CreateAuthorResponse {
        message: "Created new author.",
        authors: authors.iter().map(AuthorDump::from).collect(),
    }))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<AuthorListResponse>, ApiError> {
    let authors = state.authors.list_authors().await?;
    Ok(Json(AuthorListResponse {
        authors: authors.iter().map(AuthorDump::from).collect(),
    }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let id = parse_id(&raw_id, "Author")?;

    let author = state
        .authors
        .get_author(id)
        .await?
        .ok_or_else(|| QuotesError::author_not_found(id))?;
    let quotes = state.quotes.list_quotes_by_author(author.id).await?;

    Ok(Json(AuthorResponse {
        author: AuthorDump::from(&author),
        quotes: quotes.iter().map(QuoteSummary::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{app, get, post, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_author_returns_all_authors() {
        let app = app().await;

        let ada = json!({"first": "Ada", "last": "Lovelace"});
        let (status, body) = post(&app, "/author", ada).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Created new author.");
        assert_eq!(body["authors"][0]["formatted_name"], "Lovelace, Ada");

        let grace = json!({"first": "Grace", "last": "Hopper"});
        let (status, body) = post(&app, "/author", grace).await;
        assert_eq!(status, StatusCode::OK);

        let authors = body["authors"].as_array().unwrap();
        assert_eq!(authors.len(), 2);
        assert_ne!(authors[0]["id"], authors[1]["id"]);

        let (_, listed) = get(&app, "/authors").await;
        assert_eq!(listed["authors"], body["authors"]);
    }

    #[tokio::test]
    async fn test_create_author_twice_keeps_one_author() {
        let app = app().await;
        let ada = json!({"first": "Ada", "last": "Lovelace"});

        let (status, first) = post(&app, "/author", ada.clone()).await;
        assert_eq!(status, StatusCode::OK);
        let (status, second) = post(&app, "/author", ada).await;
        assert_eq!(status, StatusCode::OK);

        // Same contract message whether or not a row was inserted
        assert_eq!(second["message"], "Created new author.");
        assert_eq!(second["authors"], first["authors"]);
        assert_eq!(second["authors"].as_array().unwrap().len(), 1);

        let (_, listed) = get(&app, "/authors").await;
        assert_eq!(listed["authors"], json!([first["authors"][0].clone()]));
    }

    #[tokio::test]
    async fn test_create_author_ignores_client_id() {
        let app = app().await;

        let (status, body) = post(
            &app,
            "/author",
            json!({"id": 99, "first": "Ada", "last": "Lovelace", "formatted_name": "x"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authors"][0]["id"], 1);
        assert_eq!(body["authors"][0]["formatted_name"], "Lovelace, Ada");
    }

    #[tokio::test]
    async fn test_create_author_validation_errors_persist_nothing() {
        let app = app().await;

        let (status, body) = post(&app, "/author", json!({"first": "", "last": "Lovelace"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"]["first"], json!(["Data not provided."]));
        assert!(body["errors"].get("last").is_none());

        let (status, body) = post(&app, "/author", json!({"first": "Ada"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"]["last"], json!(["Missing data for required field."]));

        let (_, listed) = get(&app, "/authors").await;
        assert_eq!(listed["authors"], json!([]));
    }

    #[tokio::test]
    async fn test_create_author_bad_bodies() {
        let app = app().await;

        let (status, body) = send(&app, "POST", "/author", Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid JSON format.");

        for empty in [None, Some(""), Some("{}"), Some("null")] {
            let (status, body) = send(&app, "POST", "/author", empty).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "No input data provided.");
        }

        let (status, body) = send(&app, "POST", "/author", Some(r#"["Ada"]"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"]["_schema"], json!(["Invalid input type."]));
    }

    #[tokio::test]
    async fn test_get_author_with_quotes() {
        let app = app().await;

        for content in ["first words", "second words"] {
            let (status, _) = post(
                &app,
                "/quotes/",
                json!({"content": content, "author": {"first": "Ada", "last": "Lovelace"}}),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = get(&app, "/authors/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["author"]["first"], "Ada");
        assert_eq!(
            body["quotes"],
            json!([
                {"id": 1, "content": "first words"},
                {"id": 2, "content": "second words"}
            ])
        );
    }

    #[tokio::test]
    async fn test_get_author_not_found() {
        let app = app().await;

        for uri in ["/authors/42", "/authors/abc"] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["message"], "Author could not be found.");
        }
    }
}
