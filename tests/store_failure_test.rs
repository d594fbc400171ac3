mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{response_json, response_text, TestApp};
use fashion_store::views::storefront::LOAD_ERROR;

async fn assert_database_error(
    app: &TestApp,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) {
    let response = app.request(method.clone(), uri, body).await;
    assert_eq!(
        response.status(),
        StatusCode::INTERNAL_SERVER_ERROR,
        "{method} {uri}"
    );
    let body = response_json(response).await;
    assert_eq!(body["error"], "Internal Server Error");
    assert_eq!(body["message"], "Database error");
}

#[tokio::test]
async fn api_reports_generic_error_when_store_fails() {
    let app = TestApp::new().await;
    app.break_store().await;

    assert_database_error(&app, Method::GET, "/api/inventory", None).await;
    assert_database_error(
        &app,
        Method::POST,
        "/api/inventory",
        Some(json!({
            "name": "Wrap Dress",
            "price": 64.5,
            "stock": 12,
            "category": "Dresses",
            "image": "/uploads/1718000000000.jpg"
        })),
    )
    .await;
    assert_database_error(&app, Method::DELETE, "/api/inventory/1", None).await;
}

#[tokio::test]
async fn storefront_shows_only_the_load_message_when_store_fails() {
    let app = TestApp::new().await;
    app.break_store().await;

    let response = app.request(Method::GET, "/", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = response_text(response).await;
    assert!(html.contains(LOAD_ERROR));
    assert!(!html.contains("clothing-container"));
    assert!(!html.contains("Trending Now"));
}

#[tokio::test]
async fn admin_load_failure_replaces_requested_banner() {
    let app = TestApp::new().await;
    app.break_store().await;

    let response = app.request(Method::GET, "/admin?error=add", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = response_text(response).await;
    assert!(html.contains("Failed to load inventory. Please try again later."));
    assert!(!html.contains("Failed to add item. Please try again."));
    assert_eq!(html.matches("role=\"alert\"").count(), 1);
}
