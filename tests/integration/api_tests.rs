//! API integration tests
//!
//! Drives the router in-process over an in-memory store and a canned catalog.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use exlibris_server::{
    api,
    catalog::{BilingualLookup, CatalogClient, CatalogPage, CatalogQuery},
    repository::MemoryStore,
    services::Services,
    AppError, AppResult, AppState,
};

/// Answers known queries from a fixed table; anything else is a catalog outage
struct CannedCatalog {
    pages: Vec<(CatalogQuery, Option<i64>, Value)>,
}

#[async_trait]
impl CatalogClient for CannedCatalog {
    async fn fetch(&self, query: &CatalogQuery) -> AppResult<CatalogPage> {
        self.pages
            .iter()
            .find(|(q, _, _)| q == query)
            .map(|(_, count, results)| CatalogPage {
                count: *count,
                results: results.as_array().cloned().unwrap_or_default(),
            })
            .ok_or_else(|| AppError::Catalog(format!("unexpected query {:?}", query)))
    }
}

fn record(title: &str, author: &str, born: i32, died: i32, subjects: &[&str], downloads: i64) -> Value {
    json!({
        "title": title,
        "authors": [{ "name": author, "birth_year": born, "death_year": died }],
        "subjects": subjects,
        "languages": ["en"],
        "copyright": false,
        "download_count": downloads
    })
}

fn app() -> Router {
    let austen = record(
        "Pride and Prejudice",
        "Austen, Jane",
        1775,
        1817,
        &["Love stories -- Fiction", "Courtship -- Fiction"],
        70000,
    );
    let shakespeare = record(
        "Romeo and Juliet",
        "Shakespeare, William",
        1564,
        1616,
        &["Tragedies (Drama)"],
        20000,
    );
    let hamlet = record(
        "Hamlet, Prince of Denmark",
        "Shakespeare, William",
        1564,
        1616,
        &["Tragedies (Drama)"],
        15000,
    );

    let catalog = CannedCatalog {
        pages: vec![
            (
                CatalogQuery::Search("pride and prejudice".to_string()),
                Some(1),
                json!([austen]),
            ),
            (
                CatalogQuery::Search("romeo and juliet".to_string()),
                Some(1),
                json!([shakespeare.clone()]),
            ),
            (
                CatalogQuery::Search("no such book".to_string()),
                Some(0),
                json!([]),
            ),
            (
                CatalogQuery::Topic("Drama".to_string()),
                Some(3),
                json!([shakespeare.clone(), hamlet, shakespeare]),
            ),
            (CatalogQuery::Language("es".to_string()), Some(812), json!([])),
        ],
    };

    let services = Services::new(
        Arc::new(MemoryStore::new()),
        Arc::new(catalog),
        BilingualLookup::default(),
    );
    api::create_router(AppState {
        services: Arc::new(services),
    })
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health_and_ready() {
    let app = app();

    let (status, body) = get(&app, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get(&app, "/api/v1/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_search_stores_translated_book() {
    let app = app();

    let (status, body) = get(&app, "/api/v1/books/search?title=Orgullo%20y%20Prejuicio").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "orgullo y prejuicio");
    assert_eq!(body["author"]["name"], "Austen, Jane");
    assert_eq!(body["genre"], "Fiction");
    assert_eq!(body["genre_label"], "Ficción");
    assert_eq!(body["year_written"], Value::Null);
    assert_eq!(body["search_count"], 1);

    let (status, body) = get(&app, "/api/v1/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_repeated_search_merges_and_counts() {
    let app = app();

    get(&app, "/api/v1/books/search?title=pride%20and%20prejudice").await;
    get(&app, "/api/v1/books/search?title=Orgullo%20y%20prejuicio").await;
    get(&app, "/api/v1/books/search?title=Romeo%20y%20Julieta").await;

    let (status, body) = get(&app, "/api/v1/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = get(&app, "/api/v1/books/top?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    let top = body.as_array().unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0]["title"], "orgullo y prejuicio");
    assert_eq!(top[0]["search_count"], 2);

    let (_, body) = get(&app, "/api/v1/authors").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_errors() {
    let app = app();

    let (status, body) = get(&app, "/api/v1/books/search?title=No%20such%20book").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5);

    // Catalog outage reads as "not found"
    let (status, _) = get(&app, "/api/v1/books/search?title=Dracula").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/api/v1/books/search?title=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/api/v1/books").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_top_limit_validation() {
    let app = app();

    let (status, _) = get(&app, "/api/v1/books/top?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/api/v1/books/top").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_genre_titles_and_authors() {
    let app = app();

    let (status, body) = get(&app, "/api/v1/books/genre/Drama").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["titles"],
        json!(["romeo y julieta", "Hamlet, Prince of Denmark"])
    );

    // Duplicate records reconcile to one stored book
    let (_, body) = get(&app, "/api/v1/books").await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = get(&app, "/api/v1/authors/genre/Drama").await;
    assert_eq!(status, StatusCode::OK);
    let authors = body.as_array().unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0]["name"], "Shakespeare, William");

    let id = authors[0]["id"].as_i64().unwrap();
    let (status, body) = get(&app, &format!("/api/v1/authors/{}/books", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Unreachable genre yields an empty list, not an error
    let (status, body) = get(&app, "/api/v1/books/genre/Humor").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["titles"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_authors_alive_in_year() {
    let app = app();
    get(&app, "/api/v1/books/search?title=pride%20and%20prejudice").await;
    get(&app, "/api/v1/books/search?title=romeo%20and%20juliet").await;

    let (status, body) = get(&app, "/api/v1/authors/alive?year=1600").await;
    assert_eq!(status, StatusCode::OK);
    let alive = body.as_array().unwrap();
    assert_eq!(alive.len(), 1);
    assert_eq!(alive[0]["name"], "Shakespeare, William");

    let (_, body) = get(&app, "/api/v1/authors/alive?year=1700").await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = get(&app, "/api/v1/authors/999/books").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_count_by_language() {
    let app = app();

    let (status, body) = get(&app, "/api/v1/books/languages/ES").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "es": 812 }));

    let (status, body) = get(&app, "/api/v1/books/languages/xx").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app();

    let (status, body) = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books/search"].is_object());
}
