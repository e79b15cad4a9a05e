use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

/// Storage provider trait
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Copy a local file in under `path`, replacing anything already there
    async fn put_file(&self, path: &str, local_path: &Path) -> Result<()>;

    /// Delete data; a missing path is reported as `NotFound`
    async fn delete(&self, path: &str) -> Result<()>;

    /// Get the storage type name
    fn storage_type(&self) -> &'static str;
}
