use crate::client::api::EmployeeDraft;
use crate::models::{Employee, UploadedPhoto};

/// What a valid form submission asks the store to do
#[derive(Debug, Clone)]
pub enum FormSubmission {
    Create(EmployeeDraft),
    Update { id: String, draft: EmployeeDraft },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("salary must be a number")]
    InvalidSalary,
}

/// Create/edit form state
#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    pub name: String,
    pub position: String,
    /// Raw text of the salary input
    pub salary: String,
    pub photo: Option<UploadedPhoto>,
    editing: Option<String>,
}

impl EmployeeForm {
    /// Empty form in create mode
    pub fn new() -> Self {
        Self {
            salary: "0".to_string(),
            ..Self::default()
        }
    }

    /// Form pre-filled from `employee`, in edit mode
    pub fn for_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            position: employee.position.clone(),
            salary: employee.salary.to_string(),
            photo: None,
            editing: Some(employee.id.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit employee"
        } else {
            "Create employee"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update employee"
        } else {
            "Create employee"
        }
    }

    /// A photo must be chosen when creating, never when editing
    pub fn photo_required(&self) -> bool {
        !self.is_editing()
    }

    pub fn set_photo(&mut self, photo: UploadedPhoto) {
        self.photo = Some(photo);
    }

    /// Validate, hand back the submission and clear the fields.
    /// The form is left untouched when validation fails.
    pub fn submit(&mut self) -> Result<FormSubmission, FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::Missing("name"));
        }
        if self.position.trim().is_empty() {
            return Err(FormError::Missing("position"));
        }
        let salary: f64 = self
            .salary
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidSalary)?;
        if !salary.is_finite() {
            return Err(FormError::InvalidSalary);
        }
        if self.photo_required() && self.photo.is_none() {
            return Err(FormError::Missing("photo"));
        }

        let draft = EmployeeDraft {
            name: self.name.trim().to_string(),
            position: self.position.trim().to_string(),
            salary,
            photo: self.photo.take(),
        };
        let submission = match &self.editing {
            Some(id) => FormSubmission::Update {
                id: id.clone(),
                draft,
            },
            None => FormSubmission::Create(draft),
        };

        self.reset();
        Ok(submission)
    }

    /// Clear the fields; the mode is kept
    pub fn reset(&mut self) {
        self.name.clear();
        self.position.clear();
        self.salary = "0".to_string();
        self.photo = None;
    }
}
