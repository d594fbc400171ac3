//! Fashion Store
//!
//! Inventory API, image uploads and the server-rendered storefront and admin
//! pages of the FashionNova shop.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod tracing;
pub mod views;

use axum::{
    extract::State,
    handler::Handler,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::config::{AppConfig, AppConfigError};
use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::services::{inventory::InventoryService, uploads::UploadService};
use handlers::inventory::InventoryHandlerState;
use handlers::uploads::UploadHandlerState;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: AppConfig,
    pub inventory_service: InventoryService,
    pub upload_service: UploadService,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Self {
        let db = Arc::new(db);
        Self {
            inventory_service: InventoryService::new(db.clone()),
            upload_service: UploadService::new(&config.uploads_dir),
            db,
            config,
        }
    }

    /// Connects to the database, prepares the inventory table and the
    /// upload directory.
    pub async fn bootstrap(config: AppConfig) -> Result<Self, ServiceError> {
        let db_pool = db::establish_connection_from_app_config(&config).await?;
        let state = Self::new(db_pool, config);

        let seeded = state.inventory_service.initialize().await?;
        state.upload_service.ensure_dir().await?;

        ::tracing::info!(
            seeded,
            uploads_dir = %state.config.uploads_dir,
            "Application state ready"
        );
        Ok(state)
    }
}

impl InventoryHandlerState for AppState {
    fn inventory_service(&self) -> &InventoryService {
        &self.inventory_service
    }

    fn strict_mode(&self) -> bool {
        self.config.strict_mode
    }
}

impl UploadHandlerState for AppState {
    fn upload_service(&self) -> &UploadService {
        &self.upload_service
    }
}

/// Builds the CORS layer from the configured origins.
pub fn build_cors_layer(cfg: &AppConfig) -> Result<CorsLayer, AppConfigError> {
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    if let Some(origins) = configured_origins {
        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any))
    } else if cfg.should_allow_permissive_cors() {
        ::tracing::info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        Ok(CorsLayer::permissive())
    } else {
        ::tracing::error!("Missing CORS configuration detected");
        Err(AppConfigError::MissingCors)
    }
}

/// JSON API routes: inventory, clothing alias, upload, status and health.
pub fn api_routes(cfg: &AppConfig) -> Router<AppState> {
    Router::new()
        .route("/api/status", get(api_status))
        .route("/api/health", get(health_check))
        .merge(handlers::inventory::inventory_router::<AppState>())
        .merge(handlers::uploads::upload_router::<AppState>(
            cfg.max_upload_bytes,
        ))
}

/// The complete application: API, HTML views, Swagger UI, uploaded files
/// and the static bundle with the storefront as its fallback document.
pub fn app_router(state: AppState) -> Result<Router, AppConfigError> {
    let cors_layer = build_cors_layer(&state.config)?;

    let uploads = ServeDir::new(&state.config.uploads_dir);
    let static_bundle = ServeDir::new(&state.config.static_dir)
        .fallback(views::storefront::<AppState>.with_state(state.clone()));

    let app = Router::new()
        .route("/", get(views::storefront::<AppState>))
        .merge(views::admin_router::<AppState>())
        .merge(api_routes(&state.config))
        .merge(openapi::swagger_ui())
        .nest_service(services::uploads::UPLOADS_ROUTE, uploads)
        .fallback_service(static_bundle)
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state);

    Ok(app)
}

/// Service metadata
#[utoipa::path(
    get,
    path = "/api/status",
    responses((status = 200, description = "Service metadata")),
    tag = "health"
)]
pub async fn api_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Database connectivity check
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "All checks passed"),
        (status = 503, description = "Database unreachable")
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_status = match db::check_connection(&state.db).await {
        Ok(()) => "healthy",
        Err(_) => "unhealthy",
    };

    let status = if db_status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": Utc::now().to_rfc3339(),
    });

    (status, Json(body))
}
