//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Duration;
use content_catalog::{
    api::create_router,
    cache::ManualClock,
    store::{Item, MemoryItemStore, StoreError},
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

struct TestApp {
    router: Router,
    store: Arc<MemoryItemStore>,
    clock: Arc<ManualClock>,
}

impl TestApp {
    fn new(items: Vec<Item>) -> Self {
        let store = Arc::new(MemoryItemStore::with_items(items));
        let clock = Arc::new(ManualClock::default());
        let state = AppState::new(store.clone(), clock.clone());
        Self {
            router: create_router(state),
            store,
            clock,
        }
    }

    async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_items() -> Vec<Item> {
    vec![
        Item::active("https://a.example", "tech").with_title("Rust Book"),
        Item::active("https://b.example", "books").with_description("A rusty anchor"),
        Item::active("https://c.example", "tech").with_status("inactive"),
        Item::active("https://d.example", "games").with_tags(["RUST", "puzzle"]),
        Item::active("https://e.example", "tech")
            .with_title("Go Tour")
            .with_subcategory("lang"),
    ]
}

// == Categories Endpoint Tests ==

#[tokio::test]
async fn test_categories_sorted_and_active_only() {
    let app = TestApp::new(vec![
        Item::active("1", "tech"),
        Item::active("2", "books"),
        Item::active("3", "tech").with_status("inactive"),
    ]);

    let response = app.get("/api/browse-content?endpoint=categories").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["cache-control"],
        "public, max-age=3600"
    );

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["categories"], serde_json::json!(["books", "tech"]));
}

#[tokio::test]
async fn test_categories_served_from_cache_within_ttl() {
    let app = TestApp::new(vec![Item::active("1", "tech")]);

    app.get("/api/browse-content?endpoint=categories").await;
    app.store.insert(Item::active("2", "books")).await;
    app.clock.advance(Duration::minutes(59));

    let response = app.get("/api/browse-content?endpoint=categories").await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["categories"], serde_json::json!(["tech"]));
    assert_eq!(app.store.scan_count(), 1);
}

#[tokio::test]
async fn test_categories_recomputed_after_ttl() {
    let app = TestApp::new(vec![Item::active("1", "tech")]);

    app.get("/api/browse-content?endpoint=categories").await;
    app.store.insert(Item::active("2", "books")).await;
    app.clock.advance(Duration::minutes(61));

    let response = app.get("/api/browse-content?endpoint=categories").await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["categories"], serde_json::json!(["books", "tech"]));
}

#[tokio::test]
async fn test_categories_fallback_is_cached() {
    let app = TestApp::new(vec![Item::active("1", "tech")]);
    app.store
        .fail_next(1, StoreError::Unavailable("table offline".into()));

    let response = app.get("/api/browse-content?endpoint=categories").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let categories = json["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 11);
    assert_eq!(categories[0], "art");
    assert_eq!(categories[10], "youtube");

    // Store has recovered, but the fallback is still fresh
    let response = app.get("/api/browse-content?endpoint=categories").await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["categories"].as_array().unwrap().len(), 11);
    assert_eq!(app.store.scan_count(), 1);
}

#[tokio::test]
async fn test_endpoint_categories_takes_precedence() {
    let app = TestApp::new(vec![Item::active("1", "tech").with_title("rust")]);

    let response = app
        .get("/api/browse-content?endpoint=categories&search=rust&category=tech&isActiveOnly=true")
        .await;
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("categories").is_some());
    assert!(json.get("items").is_none());
}

// == Search Endpoint Tests ==

#[tokio::test]
async fn test_search_matches_all_fields() {
    let app = TestApp::new(sample_items());

    let response = app.get("/api/browse-content?search=Rust").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["query"], "Rust");
    assert_eq!(json["count"], 3);
    assert_eq!(json["complete"], true);
    let urls: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["url"].as_str().unwrap())
        .collect();
    assert_eq!(
        urls,
        vec!["https://a.example", "https://b.example", "https://d.example"]
    );
}

#[tokio::test]
async fn test_search_respects_limit() {
    let app = TestApp::new(sample_items());

    let response = app.get("/api/browse-content?search=rust&limit=2").await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_matches_category() {
    let app = TestApp::new(sample_items());

    let response = app.get("/api/browse-content?search=GAMES").await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["items"][0]["bfCategory"], "games");
}

#[tokio::test]
async fn test_search_store_failure_is_500() {
    let app = TestApp::new(sample_items());
    app.store
        .fail_next(1, StoreError::Unavailable("table offline".into()));

    let response = app.get("/api/browse-content?search=rust").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Internal server error");
    assert!(json["message"].as_str().unwrap().contains("table offline"));
}

// == Content Endpoint Tests ==

#[tokio::test]
async fn test_content_by_category() {
    let app = TestApp::new(sample_items());

    let response = app
        .get("/api/browse-content?category=tech&isActiveOnly=true")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["category"], "tech");
    assert_eq!(json["subcategory"], Value::Null);
    assert_eq!(json["count"], 2);
}

#[tokio::test]
async fn test_content_by_subcategory() {
    let app = TestApp::new(sample_items());

    let response = app
        .get("/api/browse-content?category=tech&subcategory=lang&isActiveOnly=false")
        .await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["subcategory"], "lang");
    assert_eq!(json["count"], 1);
    assert_eq!(json["items"][0]["title"], "Go Tour");
}

#[tokio::test]
async fn test_content_limit_truncates() {
    let items = (0..30)
        .map(|i| Item::active(format!("https://{}.example", i), "webgames"))
        .collect();
    let app = TestApp::new(items);

    let response = app
        .get("/api/browse-content?category=webgames&isActiveOnly=true&limit=7")
        .await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 7);
    assert_eq!(json["items"][0]["url"], "https://0.example");
}

#[tokio::test]
async fn test_content_store_failure_is_500() {
    let app = TestApp::new(sample_items());
    app.store
        .fail_next(1, StoreError::Throttled("slow down".into()));

    let response = app
        .get("/api/browse-content?category=tech&isActiveOnly=true")
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// == Invalid Request Tests ==

#[tokio::test]
async fn test_missing_params_is_400_with_endpoints() {
    let app = TestApp::new(sample_items());

    let response = app.get("/api/browse-content").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Invalid endpoint or missing parameters");
    assert_eq!(
        json["endpoints"]["categories"],
        "/api/browse-content?endpoint=categories"
    );
    assert!(json["endpoints"].get("search").is_some());
    assert!(json["endpoints"].get("content").is_some());
}

#[tokio::test]
async fn test_repeated_category_is_400_with_endpoints() {
    let app = TestApp::new(sample_items());

    let response = app
        .get("/api/browse-content?category=a&category=b&isActiveOnly=true")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Invalid endpoint or missing parameters");
    assert!(json["endpoints"].get("content").is_some());
}

#[tokio::test]
async fn test_category_without_active_flag_is_400() {
    let app = TestApp::new(sample_items());

    let response = app.get("/api/browse-content?category=tech").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_endpoint_value_is_400() {
    let app = TestApp::new(sample_items());

    let response = app.get("/api/browse-content?endpoint=everything").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Preflight / Health / Stats Tests ==

#[tokio::test]
async fn test_options_returns_ok() {
    let app = TestApp::new(vec![]);

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/browse-content")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new(vec![]);

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_stats_track_category_cache() {
    let app = TestApp::new(vec![Item::active("1", "tech")]);

    app.get("/api/browse-content?endpoint=categories").await;
    app.get("/api/browse-content?endpoint=categories").await;

    let response = app.get("/stats").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["refreshes"], 1);
    assert_eq!(json["has_entry"], true);
    assert_eq!(json["ttl_remaining_seconds"], 3600);
}
