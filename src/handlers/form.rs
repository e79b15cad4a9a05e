use axum::{
    async_trait,
    extract::{multipart::Field, FromRequest, Multipart, Request},
    http::header,
    Json,
};
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{EmployeeSubmission, StagedPhoto};

/// Form field carrying the photo file
const PHOTO_FIELD: &str = "photo";

/// JSON variant of the employee form; salary may arrive as number or string
#[derive(Debug, Deserialize)]
struct JsonEmployee {
    name: Option<String>,
    position: Option<String>,
    salary: Option<serde_json::Value>,
}

impl JsonEmployee {
    fn into_submission(self) -> Result<EmployeeSubmission> {
        let salary = self.salary.and_then(|v| match v {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });
        EmployeeSubmission::from_fields(self.name, self.position, salary, None)
            .map_err(AppError::Validation)
    }
}

#[async_trait]
impl<S> FromRequest<S> for EmployeeSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase().starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let Json(body) = Json::<JsonEmployee>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            return body.into_submission();
        }

        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Upload(e.body_text()))?;
        read_multipart(multipart).await
    }
}

fn unexpected_field(name: &str) -> AppError {
    AppError::Upload(format!("Unexpected field {}", name))
}

/// Collect the text fields and the optional photo from a multipart body.
/// Only one file, on the `photo` field, is accepted.
async fn read_multipart(mut multipart: Multipart) -> Result<EmployeeSubmission> {
    let mut name: Option<String> = None;
    let mut position: Option<String> = None;
    let mut salary: Option<String> = None;
    let mut photo: Option<StagedPhoto> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::Upload(format!("Failed to process multipart: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if let Some(file_name) = field.file_name().map(|s| s.to_string()) {
            if field_name != PHOTO_FIELD {
                return Err(unexpected_field(&field_name));
            }
            let staged = stage_photo(field, file_name).await?;

            // Browsers send an empty, unnamed part for an untouched file input
            if staged.is_blank() {
                continue;
            }
            if photo.is_some() {
                return Err(unexpected_field(&field_name));
            }
            photo = Some(staged);
            continue;
        }

        match field_name.as_str() {
            "name" | "position" | "salary" => {
                let text = field.text().await.map_err(|e| {
                    AppError::Upload(format!("Failed to read field {}: {}", field_name, e))
                })?;
                match field_name.as_str() {
                    "name" => name = Some(text),
                    "position" => position = Some(text),
                    _ => salary = Some(text),
                }
            }
            _ => {}
        }
    }

    EmployeeSubmission::from_fields(name, position, salary, photo).map_err(AppError::Validation)
}

/// Stream a file part into a temporary file
async fn stage_photo(mut field: Field<'_>, file_name: String) -> Result<StagedPhoto> {
    let content_type = field.content_type().map(|s| s.to_string());

    let temp = tempfile::Builder::new()
        .prefix("employee_upload_")
        .tempfile()
        .map_err(|e| AppError::Upload(format!("Failed to create temp file: {}", e)))?;
    let (file, path) = temp.into_parts();
    let mut file = tokio::fs::File::from_std(file);

    let mut size: u64 = 0;
    while let Some(chunk) = field.chunk().await.map_err(|e| {
        AppError::Upload(format!("Failed to read file chunk: {}", e))
    })? {
        file.write_all(&chunk).await.map_err(|e| {
            AppError::Upload(format!("Failed to write to temp file: {}", e))
        })?;
        size += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| {
        AppError::Upload(format!("Failed to flush temp file: {}", e))
    })?;

    Ok(StagedPhoto::new(file_name, content_type, size, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http};

    const BOUNDARY: &str = "X-EMPLOYEE-BOUNDARY";

    fn multipart_request(body: String) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        )
    }

    fn file_part(file_name: &str, data: &str) -> String {
        file_part_on("photo", file_name, data)
    }

    fn file_part_on(field: &str, file_name: &str, data: &str) -> String {
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n{}\r\n",
            BOUNDARY, field, file_name, data
        )
    }

    fn end() -> String {
        format!("--{}--\r\n", BOUNDARY)
    }

    #[tokio::test]
    async fn test_multipart_with_photo() {
        let body = [
            text_part("name", "Ana"),
            text_part("position", "Eng"),
            text_part("salary", "50000"),
            file_part("ana.png", "png-bytes"),
            end(),
        ]
        .concat();

        let submission = EmployeeSubmission::from_request(multipart_request(body), &())
            .await
            .unwrap();

        assert_eq!(submission.name, "Ana");
        assert_eq!(submission.salary, 50000.0);
        let photo = submission.photo.unwrap();
        assert_eq!(photo.file_name, "ana.png");
        assert_eq!(photo.content_type.as_deref(), Some("image/png"));
        assert_eq!(photo.size, 9);
        assert_eq!(std::fs::read(photo.path()).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn test_second_photo_is_rejected() {
        let body = [
            text_part("name", "Ana"),
            text_part("position", "Eng"),
            text_part("salary", "1"),
            file_part("a.png", "a"),
            file_part("b.png", "b"),
            end(),
        ]
        .concat();

        let err = EmployeeSubmission::from_request(multipart_request(body), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upload(ref d) if d == "Unexpected field photo"));
    }

    #[tokio::test]
    async fn test_file_on_other_field_is_rejected() {
        let body = [
            text_part("name", "Ana"),
            text_part("position", "Eng"),
            text_part("salary", "1"),
            file_part_on("avatar", "c.png", "c"),
            end(),
        ]
        .concat();

        let err = EmployeeSubmission::from_request(multipart_request(body), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upload(ref d) if d == "Unexpected field avatar"));
    }

    #[tokio::test]
    async fn test_multipart_empty_file_input_is_no_photo() {
        let body = [
            text_part("name", "Ana"),
            text_part("position", "Eng"),
            text_part("salary", "1"),
            file_part("", ""),
            end(),
        ]
        .concat();

        let submission = EmployeeSubmission::from_request(multipart_request(body), &())
            .await
            .unwrap();
        assert!(submission.photo.is_none());
    }

    #[tokio::test]
    async fn test_multipart_missing_salary_is_validation_error() {
        let body = [text_part("name", "Ana"), text_part("position", "Eng"), end()].concat();

        let err = EmployeeSubmission::from_request(multipart_request(body), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref d) if d == "salary is required"));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_upload_error() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("name=Ana"))
            .unwrap();

        let err = EmployeeSubmission::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Upload(_)));
    }

    #[tokio::test]
    async fn test_json_body_accepts_numeric_and_string_salary() {
        for salary in ["50000", "\"50000\""] {
            let req = http::Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!(
                    r#"{{"name":"Ana","position":"Eng","salary":{}}}"#,
                    salary
                )))
                .unwrap();

            let submission = EmployeeSubmission::from_request(req, &()).await.unwrap();
            assert_eq!(submission.salary, 50000.0);
            assert!(submission.photo.is_none());
        }
    }

    #[tokio::test]
    async fn test_json_body_with_bad_salary() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Ana","position":"Eng","salary":true}"#))
            .unwrap();

        let err = EmployeeSubmission::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
