mod common;

use axum::http::{Method, StatusCode};

use common::{response_bytes, response_json, TestApp};

#[tokio::test]
async fn upload_stores_file_and_serves_it_back() {
    let app = TestApp::new().await;
    let image = b"\x89PNG\r\n\x1a\nfake-image-bytes";

    let response = app
        .post_multipart("/api/upload", "image", "dress.png", image)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let image_url = body["imageUrl"].as_str().expect("imageUrl string");
    assert!(image_url.starts_with("/uploads/"), "{image_url}");
    assert!(image_url.ends_with(".png"), "{image_url}");

    let file_name = image_url.trim_start_matches("/uploads/");
    let stem = file_name.trim_end_matches(".png");
    assert!(stem.chars().all(|c| c.is_ascii_digit()), "{file_name}");
    assert_eq!(
        std::fs::read(app.uploads_dir().join(file_name)).expect("file on disk"),
        image
    );

    let response = app.request(Method::GET, image_url, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_bytes(response).await, image);
}

#[tokio::test]
async fn upload_without_image_field_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post_multipart("/api/upload", "document", "notes.txt", b"hello")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], "Validation error: No file uploaded");

    let stored = std::fs::read_dir(app.uploads_dir()).expect("uploads dir").count();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn text_value_named_image_is_not_a_file() {
    let app = TestApp::new().await;

    let response = app
        .post_multipart_part("/api/upload", "image", None, b"hello")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Validation error: No file uploaded");

    let stored = std::fs::read_dir(app.uploads_dir()).expect("uploads dir").count();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn upload_without_extension_gets_bare_timestamp_name() {
    let app = TestApp::new().await;

    let response = app
        .post_multipart("/api/upload", "image", "snapshot", b"raw")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let file_name = body["imageUrl"]
        .as_str()
        .unwrap()
        .trim_start_matches("/uploads/")
        .to_string();
    assert!(!file_name.is_empty());
    assert!(file_name.chars().all(|c| c.is_ascii_digit()), "{file_name}");
}

#[tokio::test]
async fn missing_upload_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/uploads/does-not-exist.png", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
