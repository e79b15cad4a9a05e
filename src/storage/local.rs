use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{AppError, Result};
use crate::storage::StorageProvider;

/// Flat content directory on the local file system
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn get_full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

#[async_trait]
impl StorageProvider for LocalStorage {
    async fn put_file(&self, path: &str, local_path: &Path) -> Result<()> {
        let full_path = self.get_full_path(path);

        fs::create_dir_all(&self.base_path).await?;

        // Copy, the staged file may sit on another file system
        fs::copy(local_path, &full_path).await?;
        tracing::debug!("Copied file from {:?} to {:?}", local_path, full_path);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let full_path = self.get_full_path(path);

        fs::remove_file(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound(format!("File not found: {}", path))
            } else {
                AppError::Storage(format!("Failed to delete file {}: {}", path, e))
            }
        })?;

        tracing::debug!("Deleted file {:?}", full_path);
        Ok(())
    }

    fn storage_type(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(dir: &tempfile::TempDir, data: &[u8]) -> PathBuf {
        let path = dir.path().join("staged");
        std::fs::write(&path, data).unwrap();
        path
    }

    #[tokio::test]
    async fn test_put_file_creates_directory_and_copies() {
        let dir = tempfile::tempdir().unwrap();
        let source = staged(&dir, b"png");
        let storage = LocalStorage::new(dir.path().join("uploads"));

        storage.put_file("1_a.png", &source).await.unwrap();

        let written = std::fs::read(dir.path().join("uploads/1_a.png")).unwrap();
        assert_eq!(written, b"png");
        assert!(source.exists());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.delete("nothing.png").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = staged(&dir, b"x");
        let storage = LocalStorage::new(dir.path().join("uploads"));
        storage.put_file("x.png", &source).await.unwrap();

        storage.delete("x.png").await.unwrap();
        assert!(!dir.path().join("uploads/x.png").exists());
    }
}
