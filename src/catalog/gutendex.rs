//! HTTP client for the Gutendex book catalog

use std::time::Duration;

use async_trait::async_trait;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
};

use super::{query::CatalogQuery, CatalogClient, CatalogPage};

#[derive(Clone)]
pub struct GutendexClient {
    http: reqwest::Client,
    base_url: String,
}

impl GutendexClient {
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build catalog HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CatalogClient for GutendexClient {
    async fn fetch(&self, query: &CatalogQuery) -> AppResult<CatalogPage> {
        tracing::debug!("Catalog request {} {:?}", self.base_url, query.params());

        let response = self
            .http
            .get(format!("{}/", self.base_url))
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Catalog(format!("Catalog returned HTTP {}", status)));
        }

        let page = response.json::<CatalogPage>().await?;
        tracing::debug!(
            "Catalog answered count={:?} results={}",
            page.count,
            page.results.len()
        );
        Ok(page)
    }
}
