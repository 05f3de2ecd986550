//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{author::Author, author::CreateAuthor, enums::Genre};

/// Persisted book. `(title, author_id)` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author_id: Option<i64>,
    #[sqlx(try_from = "String")]
    pub genre: Genre,
    /// Refreshed from the catalog on every re-fetch
    pub download_count: i64,
    pub year_written: Option<i32>,
    /// Catalog order, duplicates kept
    pub languages: Vec<String>,
    /// Local popularity counter, never decremented
    pub search_count: i64,
}

/// A fetched record normalized for reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCandidate {
    pub title: String,
    pub author: Option<CreateAuthor>,
    pub genre: Genre,
    pub download_count: i64,
    pub year_written: Option<i32>,
    pub languages: Vec<String>,
}

/// Insert payload once the author has been resolved
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub author_id: Option<i64>,
    pub genre: Genre,
    pub download_count: i64,
    pub year_written: Option<i32>,
    pub languages: Vec<String>,
}

/// Catalog-owned fields overwritten when a known book is fetched again
#[derive(Debug, Clone)]
pub struct UpdateBook {
    pub genre: Genre,
    pub download_count: i64,
    pub year_written: Option<i32>,
    pub languages: Vec<String>,
}

impl BookCandidate {
    pub fn to_create(&self, author_id: Option<i64>) -> CreateBook {
        CreateBook {
            title: self.title.clone(),
            author_id,
            genre: self.genre,
            download_count: self.download_count,
            year_written: self.year_written,
            languages: self.languages.clone(),
        }
    }

    pub fn to_update(&self) -> UpdateBook {
        UpdateBook {
            genre: self.genre,
            download_count: self.download_count,
            year_written: self.year_written,
            languages: self.languages.clone(),
        }
    }
}

/// Book as returned by the API, with its author and localized genre
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookDetails {
    pub id: i64,
    pub title: String,
    pub author: Option<Author>,
    pub genre: Genre,
    /// Genre in the query language (e.g. "Ficción")
    pub genre_label: String,
    pub download_count: i64,
    pub year_written: Option<i32>,
    pub languages: Vec<String>,
    pub search_count: i64,
}

impl BookDetails {
    pub fn new(book: Book, author: Option<Author>, genre_label: &str) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author,
            genre: book.genre,
            genre_label: genre_label.to_string(),
            download_count: book.download_count,
            year_written: book.year_written,
            languages: book.languages,
            search_count: book.search_count,
        }
    }
}
