//! Author reconciliation and author queries

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::{Author, BookDetails, CreateAuthor},
    repository::Repository,
};

use super::books::BookService;

/// Find-or-create on the author name
#[derive(Clone)]
pub struct AuthorResolver {
    repository: Repository,
}

impl AuthorResolver {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Return the stored author with this exact name, creating it if absent.
    /// Biographical data of an existing author is never overwritten.
    pub async fn resolve(&self, candidate: &CreateAuthor) -> AppResult<Author> {
        if let Some(existing) = self.repository.author_find_by_name(&candidate.name).await? {
            return Ok(existing);
        }

        match self.repository.author_insert(candidate).await {
            Ok(created) => {
                tracing::info!("Created author id={} name={:?}", created.id, created.name);
                Ok(created)
            }
            Err(e) if e.is_conflict() => {
                tracing::debug!(
                    "Author {:?} was inserted concurrently, reusing it",
                    candidate.name
                );
                self.repository
                    .author_find_by_name(&candidate.name)
                    .await?
                    .ok_or_else(|| {
                        AppError::Internal(format!(
                            "Author {:?} conflicted on insert but cannot be found",
                            candidate.name
                        ))
                    })
            }
            Err(e) => Err(e),
        }
    }
}

#[derive(Clone)]
pub struct AuthorService {
    repository: Repository,
    books: BookService,
}

impl AuthorService {
    pub fn new(repository: Repository, books: BookService) -> Self {
        Self { repository, books }
    }

    pub async fn list_all(&self) -> AppResult<Vec<Author>> {
        self.repository.authors_all().await
    }

    /// Authors alive at some point of `year`
    pub async fn alive_in_year(&self, year: i32) -> AppResult<Vec<Author>> {
        let authors = self.repository.authors_all().await?;
        Ok(authors.into_iter().filter(|a| a.is_alive_in(year)).collect())
    }

    /// Distinct authors of a genre fetch, in first-seen order
    pub async fn by_genre(&self, genre: &str) -> AppResult<Vec<Author>> {
        let books = self.books.list_by_genre(genre).await?;

        let mut authors = IndexMap::new();
        for author in books.into_iter().filter_map(|b| b.author) {
            authors.entry(author.id).or_insert(author);
        }
        Ok(authors.into_values().collect())
    }

    /// Books owned by one author
    pub async fn books_of(&self, author_id: i64) -> AppResult<Vec<BookDetails>> {
        let author = self
            .repository
            .author_get(author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", author_id)))?;

        let books = self.repository.books_by_author(author_id).await?;
        Ok(books
            .into_iter()
            .map(|book| self.books.details(book, Some(author.clone())))
            .collect())
    }
}
