use crate::error::{AppError, Result};
use crate::models::{Employee, EmployeeChanges, EmployeeSubmission, NewEmployee};
use crate::repository::EmployeeRepository;
use crate::services::upload::{PhotoCleanup, UploadService};
use crate::storage::StorageProvider;

/// Result of a mutation plus whatever happened to a photo it replaced or orphaned
#[derive(Debug)]
pub struct Mutation<T> {
    pub value: T,
    pub cleanup: Option<PhotoCleanup>,
}

impl<T> Mutation<T> {
    fn new(value: T, cleanup: Option<PhotoCleanup>) -> Self {
        Self { value, cleanup }
    }

    /// Log the photo cleanup and hand back the value
    pub fn logged(self) -> T {
        if let Some(cleanup) = &self.cleanup {
            cleanup.log();
        }
        self.value
    }
}

/// Employee service
pub struct EmployeeService;

impl EmployeeService {
    /// List every employee in store order
    pub async fn list(repo: &dyn EmployeeRepository) -> Result<Vec<Employee>> {
        repo.find_all().await
    }

    /// Create an employee, storing the photo first when one was sent.
    ///
    /// A stored photo is left in place if the insert fails.
    pub async fn create(
        repo: &dyn EmployeeRepository,
        storage: &dyn StorageProvider,
        submission: EmployeeSubmission,
    ) -> Result<Employee> {
        let photo_url = match submission.photo {
            Some(photo) => UploadService::persist(storage, photo).await?,
            None => String::new(),
        };

        let employee = repo
            .insert(NewEmployee {
                name: submission.name,
                position: submission.position,
                salary: submission.salary,
                photo_url,
            })
            .await
            .map_err(|e| e.rejected("Error creating employee"))?;

        tracing::info!("Created employee {}", employee.id);
        Ok(employee)
    }

    /// Overwrite an employee. A new photo replaces the reference and the
    /// previous file is deleted best-effort; otherwise the reference is kept.
    pub async fn update(
        repo: &dyn EmployeeRepository,
        storage: &dyn StorageProvider,
        id: &str,
        submission: EmployeeSubmission,
    ) -> Result<Mutation<Employee>> {
        let existing = repo
            .find_by_id(id)
            .await
            .map_err(|e| e.rejected("Error updating employee"))?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

        let new_photo = match submission.photo {
            Some(photo) => Some(UploadService::persist(storage, photo).await?),
            None => None,
        };

        let cleanup = match (&new_photo, existing.has_photo()) {
            (Some(_), true) => Some(UploadService::discard(storage, &existing.photo_url).await),
            _ => None,
        };

        let updated = repo
            .update(
                id,
                EmployeeChanges {
                    name: submission.name,
                    position: submission.position,
                    salary: submission.salary,
                    photo_url: new_photo.unwrap_or(existing.photo_url),
                },
            )
            .await
            .map_err(|e| e.rejected("Error updating employee"))?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

        tracing::info!("Updated employee {}", updated.id);
        Ok(Mutation::new(updated, cleanup))
    }

    /// Delete an employee and, best-effort, its photo.
    ///
    /// The value is the removed record, `None` when nothing matched; the HTTP
    /// layer reports success either way.
    pub async fn delete(
        repo: &dyn EmployeeRepository,
        storage: &dyn StorageProvider,
        id: &str,
    ) -> Result<Mutation<Option<Employee>>> {
        let removed = repo.delete(id).await?;

        let cleanup = match &removed {
            Some(employee) if employee.has_photo() => {
                Some(UploadService::discard(storage, &employee.photo_url).await)
            }
            _ => None,
        };

        match &removed {
            Some(employee) => tracing::info!("Deleted employee {}", employee.id),
            None => tracing::debug!("Delete requested for unknown employee {}", id),
        }
        Ok(Mutation::new(removed, cleanup))
    }
}
