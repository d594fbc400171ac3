#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use fashion_store::{app_router, config::AppConfig, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Entry document placed in the static bundle directory.
pub const STATIC_ASSET: &str = "app.js";

/// Helper harness backed by a SQLite file inside a temporary directory.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    dir: TempDir,
}

impl TestApp {
    /// Fresh database seeded with the sample catalog, default (lenient) mode.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Same as [`TestApp::new`] with `strict_mode` enabled.
    pub async fn strict() -> Self {
        Self::with_config(|cfg| cfg.strict_mode = true).await
    }

    pub async fn with_config(tweak: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let static_dir = dir.path().join("dist");
        std::fs::create_dir_all(&static_dir).expect("create static dir");
        std::fs::write(static_dir.join(STATIC_ASSET), "console.log('fashion');")
            .expect("write static asset");

        let mut cfg = AppConfig::new(
            format!(
                "sqlite://{}?mode=rwc",
                dir.path().join("inventory.db").display()
            ),
            dir.path().join("uploads").display().to_string(),
            static_dir.display().to_string(),
            "127.0.0.1".to_string(),
            0,
            "test".to_string(),
        );
        cfg.cors_allow_any_origin = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        tweak(&mut cfg);

        let state = AppState::bootstrap(cfg)
            .await
            .expect("failed to bootstrap test application");
        let router = app_router(state.clone()).expect("failed to build router");

        Self { router, state, dir }
    }

    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.state.config.uploads_dir)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Send a request with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        self.send(builder.body(body).expect("failed to build request"))
            .await
    }

    /// Post an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&self, uri: &str, form: &str) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("failed to build form request");
        self.send(request).await
    }

    /// Post a multipart body with a single file part named `field`.
    pub async fn post_multipart(
        &self,
        uri: &str,
        field: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Response {
        self.post_multipart_part(uri, field, Some(file_name), bytes)
            .await
    }

    /// Post a multipart body with one part; `None` sends a plain text value.
    pub async fn post_multipart_part(
        &self,
        uri: &str,
        field: &str,
        file_name: Option<&str>,
        bytes: &[u8],
    ) -> Response {
        let boundary = "fashion-store-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n")
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("failed to build multipart request");
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }
}

pub async fn response_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body")
        .to_vec()
}

pub async fn response_json(response: Response) -> Value {
    let bytes = response_bytes(response).await;
    serde_json::from_slice(&bytes).expect("response body is not json")
}

pub async fn response_text(response: Response) -> String {
    String::from_utf8(response_bytes(response).await).expect("response body is not utf-8")
}

/// Compares a JSON price against an expected value; SQLite stores REAL.
pub fn assert_price(value: &Value, expected: f64) {
    let actual = value.as_f64().expect("price is a json number");
    assert!(
        (actual - expected).abs() < 1e-6,
        "price {actual} != {expected}"
    );
}

impl TestApp {
    /// Drops the inventory table so every store call fails.
    pub async fn break_store(&self) {
        use sea_orm::ConnectionTrait;

        self.state
            .db
            .execute_unprepared("DROP TABLE inventory")
            .await
            .expect("drop inventory table");
    }
}
