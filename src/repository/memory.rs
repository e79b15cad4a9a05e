// In memory implementation of the employee store.
//
// Used by handler tests and by `database.url = "memory"` for local runs
// without a database file. Records keep insertion order.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Employee, EmployeeChanges, NewEmployee};
use crate::repository::EmployeeRepository;

#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    inner: RwLock<Vec<Employee>>,
    offline: AtomicBool,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the store were unreachable
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Unavailable("in-memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>> {
        self.check_online()?;
        Ok(self.inner.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>> {
        self.check_online()?;
        let guard = self.inner.read().await;
        Ok(guard.iter().find(|e| e.id == id).cloned())
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee> {
        self.check_online()?;
        let created = Employee {
            id: Uuid::new_v4().to_string(),
            name: employee.name,
            position: employee.position,
            salary: employee.salary,
            photo_url: employee.photo_url,
        };
        self.inner.write().await.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, changes: EmployeeChanges) -> Result<Option<Employee>> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        let Some(existing) = guard.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        existing.name = changes.name;
        existing.position = changes.position;
        existing.salary = changes.salary;
        existing.photo_url = changes.photo_url;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: &str) -> Result<Option<Employee>> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        let position = guard.iter().position(|e| e.id == id);
        Ok(position.map(|idx| guard.remove(idx)))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
