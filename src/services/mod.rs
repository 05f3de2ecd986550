//! Business logic services

pub mod authors;
pub mod books;
pub mod popularity;

use std::sync::Arc;

use crate::{
    catalog::{BilingualLookup, CatalogClient},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    repository: Repository,
    pub authors: authors::AuthorService,
    pub books: books::BookService,
    pub popularity: popularity::PopularityTracker,
}

impl Services {
    /// Create all services over one store and one catalog client
    pub fn new(
        repository: Repository,
        catalog: Arc<dyn CatalogClient>,
        lookup: BilingualLookup,
    ) -> Self {
        let lookup = Arc::new(lookup);
        let books = books::BookService::new(repository.clone(), catalog.clone(), lookup.clone());

        Self {
            authors: authors::AuthorService::new(repository.clone(), books.clone()),
            popularity: popularity::PopularityTracker::new(repository.clone(), catalog, lookup),
            books,
            repository,
        }
    }

    /// Storage connectivity check
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
