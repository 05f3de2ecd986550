//! Search popularity counter and catalog language totals

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    catalog::{BilingualLookup, CatalogClient, CatalogQueryBuilder},
    error::{AppError, AppResult},
    models::Book,
    repository::Repository,
};

#[derive(Clone)]
pub struct PopularityTracker {
    repository: Repository,
    catalog: Arc<dyn CatalogClient>,
    lookup: Arc<BilingualLookup>,
}

impl PopularityTracker {
    pub fn new(
        repository: Repository,
        catalog: Arc<dyn CatalogClient>,
        lookup: Arc<BilingualLookup>,
    ) -> Self {
        Self {
            repository,
            catalog,
            lookup,
        }
    }

    /// Count one successful title lookup
    pub async fn increment(&self, book_id: i64) -> AppResult<Book> {
        let book = self.repository.book_increment_search_count(book_id).await?;
        tracing::debug!("Book id={} search_count={}", book.id, book.search_count);
        Ok(book)
    }

    /// Most searched books first; equal counts keep storage order
    pub async fn top_n(&self, n: usize) -> AppResult<Vec<Book>> {
        if n == 0 {
            return Ok(Vec::new());
        }
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        self.repository.books_top_by_search_count(limit).await
    }

    /// Catalog-wide total for a language, keyed by the normalized code.
    /// Empty when the catalog has no answer.
    pub async fn count_by_language(&self, code: &str) -> AppResult<IndexMap<String, i64>> {
        if code.trim().is_empty() {
            return Err(AppError::Validation("Language code cannot be empty".to_string()));
        }

        let query = CatalogQueryBuilder::new(&self.lookup).by_language(code);
        let mut counts = IndexMap::new();
        match self.catalog.fetch(&query).await {
            Ok(page) => match page.count {
                Some(count) => {
                    counts.insert(query.text().to_string(), count);
                }
                None => tracing::info!("Catalog returned no count for language {:?}", query.text()),
            },
            Err(e) => {
                tracing::warn!("Catalog count for language {:?} failed: {}", query.text(), e);
            }
        }
        Ok(counts)
    }
}
