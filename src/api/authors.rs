//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{Author, BookDetails},
};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct YearQuery {
    pub year: i32,
}

/// List all stored authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Stored authors", body = Vec<Author>)
    )
)]
pub async fn list_authors(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list_all().await?;
    Ok(Json(authors))
}

/// Authors of the books in a genre
#[utoipa::path(
    get,
    path = "/authors/genre/{genre}",
    tag = "authors",
    params(
        ("genre" = String, Path, description = "Genre, in Spanish or English")
    ),
    responses(
        (status = 200, description = "Distinct authors", body = Vec<Author>)
    )
)]
pub async fn authors_by_genre(
    State(state): State<crate::AppState>,
    Path(genre): Path<String>,
) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.by_genre(&genre).await?;
    Ok(Json(authors))
}

/// Stored authors alive in a given year
#[utoipa::path(
    get,
    path = "/authors/alive",
    tag = "authors",
    params(YearQuery),
    responses(
        (status = 200, description = "Authors alive that year", body = Vec<Author>)
    )
)]
pub async fn authors_alive(
    State(state): State<crate::AppState>,
    Query(query): Query<YearQuery>,
) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.alive_in_year(query.year).await?;
    Ok(Json(authors))
}

/// Books of one author
#[utoipa::path(
    get,
    path = "/authors/{id}/books",
    tag = "authors",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Books of the author", body = Vec<BookDetails>),
        (status = 404, description = "Author not found")
    )
)]
pub async fn author_books(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<BookDetails>>> {
    let books = state.services.authors.books_of(id).await?;
    Ok(Json(books))
}
