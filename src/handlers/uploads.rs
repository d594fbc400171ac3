use crate::errors::ServiceError;
use crate::services::uploads::{UploadResponse, UploadService};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use tracing::{debug, instrument};

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

pub trait UploadHandlerState: Clone + Send + Sync + 'static {
    fn upload_service(&self) -> &UploadService;
}

/// Router for `POST /api/upload`, capped at `max_upload_bytes` per request.
pub fn upload_router<S>(max_upload_bytes: usize) -> Router<S>
where
    S: UploadHandlerState,
{
    Router::new()
        .route("/api/upload", post(upload_image::<S>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Store a single uploaded image
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content_type = "multipart/form-data", description = "Multipart body with one file field named `image`"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "No file uploaded", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "uploads"
)]
#[instrument(skip(state, multipart))]
pub async fn upload_image<S>(
    State(state): State<S>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ServiceError>
where
    S: UploadHandlerState,
{
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        // A part without a filename is a plain form value, not a file.
        let file_name = match (field.name(), field.file_name()) {
            (Some(IMAGE_FIELD), Some(file_name)) => file_name.to_owned(),
            (name, _) => {
                debug!(field = ?name, "Skipping multipart field");
                continue;
            }
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServiceError::BadRequest(format!("Failed to read upload: {e}")))?;

        let stored = state
            .upload_service()
            .store(Some(file_name.as_str()), &bytes)
            .await?;
        return Ok((StatusCode::OK, Json(stored)));
    }

    Err(ServiceError::ValidationError("No file uploaded".to_string()))
}
