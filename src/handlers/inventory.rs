use crate::entities::inventory_item;
use crate::errors::ServiceError;
use crate::handlers::common::{created_response, no_content_response, validate_input};
use crate::services::inventory::{InventoryDraft, InventoryService};
use axum::{
    extract::{rejection::PathRejection, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

// Trait for inventory handler state that provides access to inventory service
pub trait InventoryHandlerState: Clone + Send + Sync + 'static {
    fn inventory_service(&self) -> &InventoryService;

    /// Whether payloads are validated and missing ids answer 404.
    fn strict_mode(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItem {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Summer Dress")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 49.99)]
    pub price: Decimal,
    #[schema(example = 100)]
    pub stock: i32,
    #[schema(example = "Dresses")]
    pub category: String,
    #[schema(example = "https://source.unsplash.com/400x600/?summer+dress")]
    pub image: String,
}

impl From<inventory_item::Model> for InventoryItem {
    fn from(model: inventory_item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            stock: model.stock,
            category: model.category,
            image: model.image,
        }
    }
}

impl InventoryItem {
    fn from_draft(id: i32, draft: InventoryDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            stock: draft.stock,
            category: draft.category,
            image: draft.image,
        }
    }
}

/// Create the inventory router
pub fn inventory_router<S>() -> Router<S>
where
    S: InventoryHandlerState,
{
    Router::new()
        .route(
            "/api/inventory",
            get(list_inventory::<S>).post(create_inventory::<S>),
        )
        .route("/api/clothing", get(list_inventory::<S>))
        .route(
            "/api/inventory/:id",
            put(update_inventory::<S>).delete(delete_inventory::<S>),
        )
}

/// List every inventory item
#[utoipa::path(
    get,
    path = "/api/inventory",
    responses(
        (status = 200, description = "Inventory list returned", body = [InventoryItem],
            headers(("X-Request-Id" = String, description = "Unique request id for tracing"))
        ),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn list_inventory<S>(State(state): State<S>) -> Result<impl IntoResponse, ServiceError>
where
    S: InventoryHandlerState,
{
    let items: Vec<InventoryItem> = state
        .inventory_service()
        .list_all()
        .await?
        .into_iter()
        .map(InventoryItem::from)
        .collect();

    Ok((StatusCode::OK, Json(items)))
}

/// Create new inventory item
#[utoipa::path(
    post,
    path = "/api/inventory",
    request_body = InventoryDraft,
    responses(
        (status = 201, description = "Inventory item created", body = InventoryItem,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn create_inventory<S>(
    State(state): State<S>,
    Json(payload): Json<InventoryDraft>,
) -> Result<impl IntoResponse, ServiceError>
where
    S: InventoryHandlerState,
{
    if state.strict_mode() {
        validate_input(&payload)?;
    }

    let created = state.inventory_service().insert(payload).await?;
    Ok(created_response(InventoryItem::from(created)))
}

/// Replace every field of an inventory item
///
/// Responds with the submitted record under the path id; it is not re-read.
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    params(
        ("id" = i32, Path, description = "Inventory item ID")
    ),
    request_body = InventoryDraft,
    responses(
        (status = 200, description = "Inventory item replaced", body = InventoryItem,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found (strict mode only)", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn update_inventory<S>(
    State(state): State<S>,
    path: Result<Path<i32>, PathRejection>,
    Json(payload): Json<InventoryDraft>,
) -> Result<impl IntoResponse, ServiceError>
where
    S: InventoryHandlerState,
{
    let Path(id) = path?;
    if state.strict_mode() {
        validate_input(&payload)?;
    }

    let changed = state
        .inventory_service()
        .replace(id, payload.clone())
        .await?;

    if changed == 0 {
        if state.strict_mode() {
            return Err(ServiceError::NotFound(format!(
                "Inventory item {id} not found"
            )));
        }
        warn!(id, "Update matched no inventory item");
    }

    Ok((StatusCode::OK, Json(InventoryItem::from_draft(id, payload))))
}

/// Delete inventory item
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    params(
        ("id" = i32, Path, description = "Inventory item ID")
    ),
    responses(
        (status = 204, description = "Inventory item deleted (or already absent)",
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid id", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found (strict mode only)", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn delete_inventory<S>(
    State(state): State<S>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError>
where
    S: InventoryHandlerState,
{
    let Path(id) = path?;
    let removed = state.inventory_service().delete_by_id(id).await?;

    if removed == 0 {
        if state.strict_mode() {
            return Err(ServiceError::NotFound(format!(
                "Inventory item {id} not found"
            )));
        }
        warn!(id, "Delete matched no inventory item");
    }

    Ok(no_content_response())
}
