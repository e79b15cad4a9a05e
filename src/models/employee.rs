use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::path::Path;
use tempfile::TempPath;

/// Employee record
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub position: String,
    pub salary: f64,
    /// Generated file name in the content directory, empty when there is no photo
    #[serde(rename = "photoUrl", default)]
    pub photo_url: String,
}

impl Employee {
    pub fn has_photo(&self) -> bool {
        !self.photo_url.is_empty()
    }
}

/// Insert payload for the persistence service
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub position: String,
    pub salary: f64,
    pub photo_url: String,
}

/// Field overwrite applied by an update
#[derive(Debug, Clone)]
pub struct EmployeeChanges {
    pub name: String,
    pub position: String,
    pub salary: f64,
    pub photo_url: String,
}

/// Photo picked on the client, held in memory until it is sent
#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Photo streamed out of a request into a temporary file.
/// The temporary file is removed when this value is dropped.
#[derive(Debug)]
pub struct StagedPhoto {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: u64,
    path: TempPath,
}

impl StagedPhoto {
    pub fn new(file_name: String, content_type: Option<String>, size: u64, path: TempPath) -> Self {
        Self {
            file_name,
            content_type,
            size,
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// An untouched browser file input: no name, no bytes
    pub fn is_blank(&self) -> bool {
        self.file_name.is_empty() && self.size == 0
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(file_name: &str, data: &[u8]) -> Self {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        Self::new(
            file_name.to_string(),
            Some("image/png".to_string()),
            data.len() as u64,
            file.into_temp_path(),
        )
    }
}

/// Validated create/update input
#[derive(Debug)]
pub struct EmployeeSubmission {
    pub name: String,
    pub position: String,
    pub salary: f64,
    pub photo: Option<StagedPhoto>,
}

impl EmployeeSubmission {
    /// Build a submission from raw form values.
    pub fn from_fields(
        name: Option<String>,
        position: Option<String>,
        salary: Option<String>,
        photo: Option<StagedPhoto>,
    ) -> Result<Self, String> {
        let name = required_text("name", name)?;
        let position = required_text("position", position)?;
        let salary = parse_salary(salary)?;

        Ok(Self {
            name,
            position,
            salary,
            photo,
        })
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(format!("{} is required", field)),
    }
}

fn parse_salary(value: Option<String>) -> Result<f64, String> {
    let raw = value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| "salary is required".to_string())?;
    let salary: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("salary must be a number, got {:?}", raw))?;
    if !salary.is_finite() {
        return Err(format!("salary must be a finite number, got {:?}", raw));
    }
    Ok(salary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_submission_trims_text() {
        let s = EmployeeSubmission::from_fields(text(" Ana "), text("Eng"), text("50000"), None).unwrap();
        assert_eq!(s.name, "Ana");
        assert_eq!(s.salary, 50000.0);
        assert!(s.photo.is_none());
    }

    #[test]
    fn test_submission_rejects_missing_fields() {
        let err = EmployeeSubmission::from_fields(None, text("Eng"), text("1"), None).unwrap_err();
        assert_eq!(err, "name is required");
        let err = EmployeeSubmission::from_fields(text("Ana"), text("  "), text("1"), None).unwrap_err();
        assert_eq!(err, "position is required");
        let err = EmployeeSubmission::from_fields(text("Ana"), text("Eng"), None, None).unwrap_err();
        assert_eq!(err, "salary is required");
    }

    #[test]
    fn test_submission_rejects_bad_salary() {
        assert!(EmployeeSubmission::from_fields(text("Ana"), text("Eng"), text("lots"), None).is_err());
        assert!(EmployeeSubmission::from_fields(text("Ana"), text("Eng"), text("NaN"), None).is_err());
    }

    #[test]
    fn test_staged_photo_removed_on_drop() {
        let photo = StagedPhoto::from_bytes("ana.png", b"png");
        let path = photo.path().to_path_buf();
        assert!(path.exists());
        assert!(!photo.is_blank());

        drop(photo);
        assert!(!path.exists());
    }

    #[test]
    fn test_employee_json_keys() {
        let employee = Employee {
            id: "abc".to_string(),
            name: "Ana".to_string(),
            position: "Eng".to_string(),
            salary: 50000.0,
            photo_url: String::new(),
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["_id"], "abc");
        assert_eq!(json["photoUrl"], "");
        assert_eq!(json["salary"].as_f64(), Some(50000.0));

        let back: Employee = serde_json::from_value(json).unwrap();
        assert_eq!(back, employee);
    }
}
