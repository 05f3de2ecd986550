//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ex Libris API",
        version = "0.3.0",
        description = "Bilingual book catalog backed by Gutendex",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::search_book,
        books::list_titles_by_genre,
        books::list_books,
        books::top_books,
        books::count_by_language,
        // Authors
        authors::list_authors,
        authors::authors_by_genre,
        authors::authors_alive,
        authors::author_books,
    ),
    components(
        schemas(
            // Books
            crate::models::Book,
            crate::models::BookDetails,
            crate::models::Genre,
            books::TitleQuery,
            books::TopQuery,
            books::GenreTitlesResponse,
            // Authors
            crate::models::Author,
            authors::YearQuery,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog lookups and stored books"),
        (name = "authors", description = "Stored authors")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
