//! Ex Libris bilingual book catalog
//!
//! Looks books up in the Gutendex catalog by Spanish or English title,
//! stores them with their authors, and serves the collection over a REST
//! JSON API.

use std::sync::Arc;

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
