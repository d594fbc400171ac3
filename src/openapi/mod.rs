use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fashion Store API",
        version = "0.1.0",
        description = r#"
# Fashion Store API

Inventory and image-upload endpoints behind the FashionNova storefront.

## Inventory

One resource: a clothing item with `name`, `price`, `stock`, `category` and `image`.
Items are listed in full (no pagination), created, replaced by id and deleted by id.
`/api/clothing` is an alias of `GET /api/inventory`.

Updates and deletes of an unknown id succeed silently unless the server runs
with `strict_mode`, which answers 404 and validates payloads.

## Uploads

`POST /api/upload` takes a single multipart file field named `image` and
returns `{ "imageUrl": "/uploads/<name>" }`.

## Error Handling

```json
{
  "error": "Bad Request",
  "message": "Validation error: No file uploaded",
  "request_id": "0b8f...",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development")
    ),
    tags(
        (name = "inventory", description = "Inventory management endpoints"),
        (name = "uploads", description = "Image upload endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        // Inventory
        crate::handlers::inventory::list_inventory,
        crate::handlers::inventory::create_inventory,
        crate::handlers::inventory::update_inventory,
        crate::handlers::inventory::delete_inventory,

        // Uploads
        crate::handlers::uploads::upload_image,

        // Health
        crate::health_check,
        crate::api_status,
    ),
    components(
        schemas(
            crate::handlers::inventory::InventoryItem,
            crate::services::inventory::InventoryDraft,
            crate::services::uploads::UploadResponse,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
