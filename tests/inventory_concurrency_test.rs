mod common;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn concurrent_creates_get_unique_ids() {
    let app = Arc::new(TestApp::new().await);

    let mut tasks = Vec::new();
    for n in 0..20 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let response = app
                .request(
                    Method::POST,
                    "/api/inventory",
                    Some(json!({
                        "name": format!("Tee #{n}"),
                        "price": 19.99,
                        "stock": n,
                        "category": "Tops",
                        "image": "https://img.example/tee.jpg"
                    })),
                )
                .await;
            assert_eq!(response.status(), StatusCode::CREATED);
            response_json(response).await["id"]
                .as_i64()
                .expect("assigned id")
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        let id = task.await.expect("create task panicked");
        assert!(ids.insert(id), "duplicate id {id}");
    }
    assert_eq!(ids.len(), 20);

    let items = response_json(app.request(Method::GET, "/api/inventory", None).await).await;
    assert_eq!(items.as_array().unwrap().len(), 25);
}

#[tokio::test]
async fn concurrent_replacements_leave_one_complete_record() {
    let app = Arc::new(TestApp::new().await);

    let mut tasks = Vec::new();
    for n in 0..10 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let response = app
                .request(
                    Method::PUT,
                    "/api/inventory/1",
                    Some(json!({
                        "name": format!("Dress v{n}"),
                        "price": 40 + n,
                        "stock": n,
                        "category": format!("Cat {n}"),
                        "image": format!("/uploads/{n}.jpg")
                    })),
                )
                .await;
            assert_eq!(response.status(), StatusCode::OK);
        }));
    }
    for task in tasks {
        task.await.expect("update task panicked");
    }

    // last write wins, but the row is never a mix of two writes
    let items = response_json(app.request(Method::GET, "/api/inventory", None).await).await;
    let row = items
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["id"] == 1)
        .cloned()
        .expect("row 1 still present");
    let n = row["stock"].as_i64().unwrap();
    assert_eq!(row["name"], format!("Dress v{n}"));
    assert_eq!(row["category"], format!("Cat {n}"));
    assert_eq!(row["image"], format!("/uploads/{n}.jpg"));
}
