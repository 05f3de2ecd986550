//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, Book, CreateAuthor, CreateBook, UpdateBook},
};

pub use memory::MemoryStore;

/// Access patterns the services rely on. Inserts that would break the
/// author-name or (title, author) uniqueness fail with `AppError::Conflict`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn ping(&self) -> AppResult<()>;

    async fn author_find_by_name(&self, name: &str) -> AppResult<Option<Author>>;
    async fn author_get(&self, id: i64) -> AppResult<Option<Author>>;
    async fn author_insert(&self, author: &CreateAuthor) -> AppResult<Author>;
    async fn authors_all(&self) -> AppResult<Vec<Author>>;

    /// All books with this exact title and author, oldest first
    async fn book_find_by_title_and_author(
        &self,
        title: &str,
        author_id: Option<i64>,
    ) -> AppResult<Vec<Book>>;
    async fn book_insert(&self, book: &CreateBook) -> AppResult<Book>;
    async fn book_update(&self, id: i64, update: &UpdateBook) -> AppResult<Book>;
    async fn book_increment_search_count(&self, id: i64) -> AppResult<Book>;
    async fn books_all(&self) -> AppResult<Vec<Book>>;
    async fn books_by_author(&self, author_id: i64) -> AppResult<Vec<Book>>;
    /// Descending search count, ties by id
    async fn books_top_by_search_count(&self, limit: i64) -> AppResult<Vec<Book>>;
}

/// Shared handle the services hold
pub type Repository = Arc<dyn CatalogStore>;

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
}

impl PgStore {
    /// Create a new store with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn author_find_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        self.authors.find_by_name(name).await
    }

    async fn author_get(&self, id: i64) -> AppResult<Option<Author>> {
        self.authors.get(id).await
    }

    async fn author_insert(&self, author: &CreateAuthor) -> AppResult<Author> {
        self.authors.insert(author).await
    }

    async fn authors_all(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    async fn book_find_by_title_and_author(
        &self,
        title: &str,
        author_id: Option<i64>,
    ) -> AppResult<Vec<Book>> {
        self.books.find_by_title_and_author(title, author_id).await
    }

    async fn book_insert(&self, book: &CreateBook) -> AppResult<Book> {
        self.books.insert(book).await
    }

    async fn book_update(&self, id: i64, update: &UpdateBook) -> AppResult<Book> {
        self.books.update(id, update).await
    }

    async fn book_increment_search_count(&self, id: i64) -> AppResult<Book> {
        self.books.increment_search_count(id).await
    }

    async fn books_all(&self) -> AppResult<Vec<Book>> {
        self.books.list().await
    }

    async fn books_by_author(&self, author_id: i64) -> AppResult<Vec<Book>> {
        self.books.list_by_author(author_id).await
    }

    async fn books_top_by_search_count(&self, limit: i64) -> AppResult<Vec<Book>> {
        self.books.top_by_search_count(limit).await
    }
}
