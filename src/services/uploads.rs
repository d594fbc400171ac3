use crate::errors::ServiceError;
use chrono::Utc;
use metrics::counter;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Public path prefix uploaded files are served under
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Result of a successful upload
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Relative URL the file is served from
    #[schema(example = "/uploads/1718000000000.jpg")]
    pub image_url: String,
}

/// Writes uploaded images into a single local directory.
///
/// Files are named `<unix-millis><.ext>`; concurrent uploads landing on the
/// same millisecond move on to the next free one.
#[derive(Clone, Debug)]
pub struct UploadService {
    root: PathBuf,
}

impl UploadService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the upload directory if it is missing
    pub async fn ensure_dir(&self) -> Result<(), ServiceError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Persists `bytes` and returns the URL the file is reachable at.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn store(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<UploadResponse, ServiceError> {
        let ext = extension_of(original_name);
        let mut stamp = Utc::now().timestamp_millis();

        loop {
            let file_name = format!("{stamp}{ext}");
            let path = self.root.join(&file_name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    stamp += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            file.write_all(bytes).await?;
            file.flush().await?;

            counter!("fashion_store.uploads.stored", 1);
            info!(file_name = %file_name, "Stored uploaded image");

            return Ok(UploadResponse {
                image_url: format!("{UPLOADS_ROUTE}/{file_name}"),
            });
        }
    }
}

/// The original extension including its dot, or empty.
///
/// Extensions with anything but ASCII alphanumerics are dropped so the
/// generated name never carries path characters.
pub fn extension_of(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
