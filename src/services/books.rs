//! Book ingestion: fetch from the catalog, normalize, and reconcile
//! against the stored books

use std::{collections::HashMap, sync::Arc};

use indexmap::IndexSet;

use crate::{
    catalog::{decode_records, BilingualLookup, CatalogClient, CatalogQueryBuilder},
    error::{AppError, AppResult},
    models::{Author, Book, BookCandidate, BookDetails},
    repository::Repository,
};

use super::{authors::AuthorResolver, popularity::PopularityTracker};

/// What reconciliation did with a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    Created,
    Merged,
}

#[derive(Debug, Clone)]
pub struct Reconciled {
    pub book: Book,
    pub author: Option<Author>,
    pub action: ReconcileAction,
}

/// Find-or-merge on (title, resolved author)
#[derive(Clone)]
pub struct BookReconciler {
    repository: Repository,
    authors: AuthorResolver,
}

impl BookReconciler {
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: AuthorResolver::new(repository.clone()),
            repository,
        }
    }

    /// Merge the candidate into the matching stored book, or store it as new.
    /// Merging keeps the stored id and search count.
    pub async fn reconcile(&self, candidate: &BookCandidate) -> AppResult<Reconciled> {
        let author = match &candidate.author {
            Some(author) => Some(self.authors.resolve(author).await?),
            None => None,
        };
        let author_id = author.as_ref().map(|a| a.id);

        if let Some(book) = self.merge_existing(candidate, author_id).await? {
            return Ok(Reconciled {
                book,
                author,
                action: ReconcileAction::Merged,
            });
        }

        match self.repository.book_insert(&candidate.to_create(author_id)).await {
            Ok(book) => {
                tracing::info!("Stored new book id={} title={:?}", book.id, book.title);
                Ok(Reconciled {
                    book,
                    author,
                    action: ReconcileAction::Created,
                })
            }
            Err(e) if e.is_conflict() => {
                tracing::debug!(
                    "Book {:?} was inserted concurrently, merging instead",
                    candidate.title
                );
                let book = self
                    .merge_existing(candidate, author_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::Internal(format!(
                            "Book {:?} conflicted on insert but cannot be found",
                            candidate.title
                        ))
                    })?;
                Ok(Reconciled {
                    book,
                    author,
                    action: ReconcileAction::Merged,
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn merge_existing(
        &self,
        candidate: &BookCandidate,
        author_id: Option<i64>,
    ) -> AppResult<Option<Book>> {
        let matches = self
            .repository
            .book_find_by_title_and_author(&candidate.title, author_id)
            .await?;

        let Some(canonical) = matches.first() else {
            return Ok(None);
        };
        if matches.len() > 1 {
            tracing::warn!(
                "{} stored books share title {:?} and author {:?}; merging into id={}",
                matches.len(),
                candidate.title,
                author_id,
                canonical.id
            );
        }

        let book = self
            .repository
            .book_update(canonical.id, &candidate.to_update())
            .await?;
        tracing::debug!("Merged catalog data into book id={}", book.id);
        Ok(Some(book))
    }
}

/// Entry point for the title and genre lookups
#[derive(Clone)]
pub struct BookService {
    repository: Repository,
    catalog: Arc<dyn CatalogClient>,
    lookup: Arc<BilingualLookup>,
    reconciler: BookReconciler,
    popularity: PopularityTracker,
}

impl BookService {
    pub fn new(
        repository: Repository,
        catalog: Arc<dyn CatalogClient>,
        lookup: Arc<BilingualLookup>,
    ) -> Self {
        Self {
            reconciler: BookReconciler::new(repository.clone()),
            popularity: PopularityTracker::new(repository.clone(), catalog.clone(), lookup.clone()),
            repository,
            catalog,
            lookup,
        }
    }

    /// Look a title up in the catalog and store the first result whose title
    /// contains the (translated) search text. A hit counts as one search.
    pub async fn search_by_title(&self, text: &str) -> AppResult<Option<BookDetails>> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("Title cannot be empty".to_string()));
        }

        let query = CatalogQueryBuilder::new(&self.lookup).by_title(text);
        let needle = query.text().to_lowercase();

        let page = match self.catalog.fetch(&query).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Catalog lookup for title {:?} failed: {}", text, e);
                return Ok(None);
            }
        };

        let Some(record) = decode_records(page.results)
            .into_iter()
            .find(|record| record.title.to_lowercase().contains(&needle))
        else {
            tracing::info!("No catalog match for title {:?}", text);
            return Ok(None);
        };

        let candidate = record.into_candidate(&self.lookup);
        let reconciled = match self.reconciler.reconcile(&candidate).await {
            Ok(reconciled) => reconciled,
            Err(e) => {
                tracing::warn!("Could not store book {:?}: {}", candidate.title, e);
                return Ok(None);
            }
        };

        let book = match self.popularity.increment(reconciled.book.id).await {
            Ok(book) => book,
            Err(e) => {
                tracing::warn!(
                    "Could not count search for book id={}: {}",
                    reconciled.book.id,
                    e
                );
                return Ok(None);
            }
        };
        Ok(Some(self.details(book, reconciled.author)))
    }

    /// Fetch a genre from the catalog and reconcile every record.
    /// A record appearing twice maps to the same stored book both times.
    pub async fn list_by_genre(&self, genre: &str) -> AppResult<Vec<BookDetails>> {
        if genre.trim().is_empty() {
            return Err(AppError::Validation("Genre cannot be empty".to_string()));
        }

        let query = CatalogQueryBuilder::new(&self.lookup).by_genre(genre);
        let page = match self.catalog.fetch(&query).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Catalog lookup for genre {:?} failed: {}", genre, e);
                return Ok(Vec::new());
            }
        };

        let mut books = Vec::new();
        for record in decode_records(page.results) {
            let candidate = record.into_candidate(&self.lookup);
            match self.reconciler.reconcile(&candidate).await {
                Ok(reconciled) => books.push(self.details(reconciled.book, reconciled.author)),
                Err(e) => {
                    tracing::warn!("Skipping book {:?}: {}", candidate.title, e);
                }
            }
        }

        if books.is_empty() {
            tracing::info!("No books found for genre {:?}", genre);
        }
        Ok(books)
    }

    /// Distinct titles of a genre fetch, in catalog order
    pub async fn titles_by_genre(&self, genre: &str) -> AppResult<Vec<String>> {
        let titles: IndexSet<String> = self
            .list_by_genre(genre)
            .await?
            .into_iter()
            .map(|b| b.title)
            .collect();
        Ok(titles.into_iter().collect())
    }

    pub async fn list_all(&self) -> AppResult<Vec<BookDetails>> {
        let books = self.repository.books_all().await?;
        self.with_authors(books).await
    }

    pub async fn most_searched(&self, limit: usize) -> AppResult<Vec<BookDetails>> {
        let books = self.popularity.top_n(limit).await?;
        self.with_authors(books).await
    }

    pub async fn with_authors(&self, books: Vec<Book>) -> AppResult<Vec<BookDetails>> {
        let authors: HashMap<i64, Author> = self
            .repository
            .authors_all()
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(books
            .into_iter()
            .map(|book| {
                let author = book.author_id.and_then(|id| authors.get(&id).cloned());
                self.details(book, author)
            })
            .collect())
    }

    pub fn details(&self, book: Book, author: Option<Author>) -> BookDetails {
        let label = self.lookup.genre_label(book.genre);
        BookDetails::new(book, author, label)
    }
}
