//! API handlers for Ex Libris REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books))
        .route("/books/search", get(books::search_book))
        .route("/books/top", get(books::top_books))
        .route("/books/genre/:genre", get(books::list_titles_by_genre))
        .route("/books/languages/:code", get(books::count_by_language))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route("/authors/alive", get(authors::authors_alive))
        .route("/authors/genre/:genre", get(authors::authors_by_genre))
        .route("/authors/:id/books", get(authors::author_books))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
