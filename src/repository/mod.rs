//! Persistence service for employee records.
//!
//! The rest of the crate only sees [`EmployeeRepository`]; which backend sits
//! behind it is decided once at startup by [`connect`].

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::db::Database;
use crate::error::Result;
use crate::models::{Employee, EmployeeChanges, NewEmployee};

pub use memory::InMemoryEmployeeRepository;
pub use sqlite::SqliteEmployeeRepository;

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All records in store order
    async fn find_all(&self) -> Result<Vec<Employee>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>>;

    /// Insert a record and return it with its assigned id
    async fn insert(&self, employee: NewEmployee) -> Result<Employee>;

    /// Overwrite every field of `id`; `None` when no such record exists
    async fn update(&self, id: &str, changes: EmployeeChanges) -> Result<Option<Employee>>;

    /// Remove `id` and return what was removed
    async fn delete(&self, id: &str) -> Result<Option<Employee>>;

    fn backend(&self) -> &'static str;
}

/// Build the repository named by the database config
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn EmployeeRepository>> {
    if config.is_memory() {
        return Ok(Arc::new(InMemoryEmployeeRepository::new()));
    }

    let db = Database::new(&config.url).await?;
    db.run_migrations().await?;
    Ok(Arc::new(SqliteEmployeeRepository::new(db)))
}
