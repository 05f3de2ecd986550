//! Books repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, UpdateBook},
};

const BOOK_COLUMNS: &str =
    "id, title, author_id, genre, download_count, year_written, languages, search_count";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub async fn find_by_title_and_author(
        &self,
        title: &str,
        author_id: Option<i64>,
    ) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE title = $1 AND author_id IS NOT DISTINCT FROM $2 ORDER BY id",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(title)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS);
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_by_author(&self, author_id: i64) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE author_id = $1 ORDER BY id",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn top_by_search_count(&self, limit: i64) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books ORDER BY search_count DESC, id ASC LIMIT $1",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Insert a new book with a zero search count; a taken (title, author) is a Conflict
    pub async fn insert(&self, book: &CreateBook) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO books (title, author_id, genre, download_count, year_written, languages, search_count)
            VALUES ($1, $2, $3, $4, $5, $6, 0)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let created = sqlx::query_as::<_, Book>(&query)
            .bind(&book.title)
            .bind(book.author_id)
            .bind(book.genre.as_str())
            .bind(book.download_count)
            .bind(book.year_written)
            .bind(&book.languages)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    /// Overwrite catalog-owned fields; id and search count are untouched
    pub async fn update(&self, id: i64, update: &UpdateBook) -> AppResult<Book> {
        let query = format!(
            r#"
            UPDATE books
            SET genre = $2, download_count = $3, year_written = $4, languages = $5
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(update.genre.as_str())
            .bind(update.download_count)
            .bind(update.year_written)
            .bind(&update.languages)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub async fn increment_search_count(&self, id: i64) -> AppResult<Book> {
        let query = format!(
            "UPDATE books SET search_count = search_count + 1 WHERE id = $1 RETURNING {}",
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }
}
