use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::StagedPhoto;
use crate::storage::StorageProvider;

/// Outcome of a best-effort photo deletion
#[derive(Debug)]
pub struct PhotoCleanup {
    pub photo: String,
    pub result: Result<()>,
}

impl PhotoCleanup {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn log(&self) {
        match &self.result {
            Ok(()) => tracing::debug!("Deleted photo {}", self.photo),
            Err(e) => tracing::warn!("Error deleting photo {}: {}", self.photo, e),
        }
    }
}

/// Photo persistence in the content directory
pub struct UploadService;

impl UploadService {
    /// Generated name `<unix-millis>_<original-name>`
    pub fn photo_name(original: &str, millis: i64) -> String {
        format!("{}_{}", millis, Self::sanitize(original))
    }

    /// Reduce a client-supplied file name to its last path component
    fn sanitize(original: &str) -> &str {
        match original.rsplit(['/', '\\']).next() {
            Some(base) if !base.is_empty() && base != "." && base != ".." => base,
            _ => "photo",
        }
    }

    /// Move the staged photo into storage and return its generated name.
    /// The staged file is released on return, whatever the outcome.
    pub async fn persist(storage: &dyn StorageProvider, photo: StagedPhoto) -> Result<String> {
        let name = Self::photo_name(&photo.file_name, Utc::now().timestamp_millis());

        storage
            .put_file(&name, photo.path())
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        tracing::info!(
            "Stored photo {} ({} bytes, {})",
            name,
            photo.size,
            photo.content_type.as_deref().unwrap_or("unknown type")
        );
        Ok(name)
    }

    /// Delete a stored photo, reporting rather than raising failures
    pub async fn discard(storage: &dyn StorageProvider, photo: &str) -> PhotoCleanup {
        PhotoCleanup {
            photo: photo.to_string(),
            result: storage.delete(photo).await,
        }
    }
}
