//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::BookDetails,
};

const DEFAULT_TOP_LIMIT: usize = 10;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TitleQuery {
    /// Title text, in Spanish or English
    pub title: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TopQuery {
    /// Number of books to return (default: 10)
    pub limit: Option<usize>,
}

#[derive(Serialize, ToSchema)]
pub struct GenreTitlesResponse {
    pub genre: String,
    pub titles: Vec<String>,
}

/// Look a book up by title in the external catalog
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(TitleQuery),
    responses(
        (status = 200, description = "Book found and stored", body = BookDetails),
        (status = 400, description = "Empty title"),
        (status = 404, description = "No catalog match")
    )
)]
pub async fn search_book(
    State(state): State<crate::AppState>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Json<BookDetails>> {
    state
        .services
        .books
        .search_by_title(&query.title)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No book found for title {:?}", query.title)))
}

/// List titles of a genre, fetched from the catalog
#[utoipa::path(
    get,
    path = "/books/genre/{genre}",
    tag = "books",
    params(
        ("genre" = String, Path, description = "Genre, in Spanish or English")
    ),
    responses(
        (status = 200, description = "Distinct titles", body = GenreTitlesResponse)
    )
)]
pub async fn list_titles_by_genre(
    State(state): State<crate::AppState>,
    Path(genre): Path<String>,
) -> AppResult<Json<GenreTitlesResponse>> {
    let titles = state.services.books.titles_by_genre(&genre).await?;
    Ok(Json(GenreTitlesResponse { genre, titles }))
}

/// List all stored books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Stored books", body = Vec<BookDetails>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<BookDetails>>> {
    let books = state.services.books.list_all().await?;
    Ok(Json(books))
}

/// Most searched books
#[utoipa::path(
    get,
    path = "/books/top",
    tag = "books",
    params(TopQuery),
    responses(
        (status = 200, description = "Books by descending search count", body = Vec<BookDetails>),
        (status = 400, description = "Invalid limit")
    )
)]
pub async fn top_books(
    State(state): State<crate::AppState>,
    Query(query): Query<TopQuery>,
) -> AppResult<Json<Vec<BookDetails>>> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    if limit == 0 {
        return Err(AppError::Validation("limit must be at least 1".to_string()));
    }
    let books = state.services.books.most_searched(limit).await?;
    Ok(Json(books))
}

/// Number of catalog books in a language
#[utoipa::path(
    get,
    path = "/books/languages/{code}",
    tag = "books",
    params(
        ("code" = String, Path, description = "Language code, e.g. en, es")
    ),
    responses(
        (status = 200, description = "Catalog total keyed by language code; empty when unknown", body = HashMap<String, i64>)
    )
)]
pub async fn count_by_language(
    State(state): State<crate::AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<IndexMap<String, i64>>> {
    let counts = state.services.popularity.count_by_language(&code).await?;
    Ok(Json(counts))
}
