use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::db::Database;
use crate::error::Result;
use crate::models::{Employee, EmployeeChanges, NewEmployee};
use crate::repository::EmployeeRepository;

const COLUMNS: &str = "id, name, position, salary, photo_url";

/// SQLite-backed employee store
pub struct SqliteEmployeeRepository {
    db: Database,
}

impl SqliteEmployeeRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>> {
        let employees: Vec<Employee> =
            sqlx::query_as(&format!("SELECT {} FROM employees ORDER BY rowid", COLUMNS))
                .fetch_all(self.db.pool())
                .await?;

        Ok(employees)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>> {
        let employee: Option<Employee> =
            sqlx::query_as(&format!("SELECT {} FROM employees WHERE id = ?", COLUMNS))
                .bind(id)
                .fetch_optional(self.db.pool())
                .await?;

        Ok(employee)
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let created: Employee = sqlx::query_as(&format!(
            r#"
            INSERT INTO employees (id, name, position, salary, photo_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&id)
        .bind(&employee.name)
        .bind(&employee.position)
        .bind(employee.salary)
        .bind(&employee.photo_url)
        .bind(&now)
        .bind(&now)
        .fetch_one(self.db.pool())
        .await?;

        Ok(created)
    }

    async fn update(&self, id: &str, changes: EmployeeChanges) -> Result<Option<Employee>> {
        let now = Utc::now().to_rfc3339();

        let updated: Option<Employee> = sqlx::query_as(&format!(
            r#"
            UPDATE employees
            SET name = ?, position = ?, salary = ?, photo_url = ?, updated_at = ?
            WHERE id = ?
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&changes.name)
        .bind(&changes.position)
        .bind(changes.salary)
        .bind(&changes.photo_url)
        .bind(&now)
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<Option<Employee>> {
        let deleted: Option<Employee> = sqlx::query_as(&format!(
            "DELETE FROM employees WHERE id = ? RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(deleted)
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
