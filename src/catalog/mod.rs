//! External book-metadata catalog: query building, record normalization
//! and the HTTP client

pub mod classifier;
pub mod gutendex;
pub mod query;
pub mod record;
pub mod translation;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;

pub use classifier::classify_genre;
pub use gutendex::GutendexClient;
pub use query::{CatalogQuery, CatalogQueryBuilder};
pub use record::{decode_records, CatalogRecord};
pub use translation::BilingualLookup;

/// One page of catalog results. Records stay raw so each can fail to decode
/// on its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogPage {
    /// Catalog-wide total for the query
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Best-effort fetch from the external catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch(&self, query: &CatalogQuery) -> AppResult<CatalogPage>;
}
