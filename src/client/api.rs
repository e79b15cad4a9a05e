use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::error::ErrorResponse;
use crate::models::{Employee, UploadedPhoto};

/// Client-side failure of an API call
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Invalid(String),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Fields sent by the create/edit form
#[derive(Debug, Clone)]
pub struct EmployeeDraft {
    pub name: String,
    pub position: String,
    pub salary: f64,
    pub photo: Option<UploadedPhoto>,
}

/// Network seam of the client store
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Employee>>;

    async fn create(&self, draft: &EmployeeDraft) -> ClientResult<Employee>;

    async fn update(&self, id: &str, draft: &EmployeeDraft) -> ClientResult<Employee>;

    async fn delete(&self, id: &str) -> ClientResult<()>;
}

/// HTTP implementation against `<server-root>/api/employees`
#[derive(Clone)]
pub struct HttpEmployeeApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEmployeeApi {
    pub fn new(server_root: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/employees", server_root.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form(draft: &EmployeeDraft) -> ClientResult<Form> {
        let mut form = Form::new()
            .text("name", draft.name.clone())
            .text("position", draft.position.clone())
            .text("salary", draft.salary.to_string());

        if let Some(photo) = &draft.photo {
            let mut part = Part::bytes(photo.data.to_vec()).file_name(photo.file_name.clone());
            if let Some(content_type) = &photo.content_type {
                part = part.mime_str(content_type)?;
            }
            form = form.part("photo", part);
        }

        Ok(form)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => format!("Request failed with status code {}", status.as_u16()),
        };
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl EmployeeApi for HttpEmployeeApi {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        let response = self.client.get(&self.endpoint).send().await?;
        Self::read(response).await
    }

    async fn create(&self, draft: &EmployeeDraft) -> ClientResult<Employee> {
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(Self::form(draft)?)
            .send()
            .await?;
        Self::read(response).await
    }

    async fn update(&self, id: &str, draft: &EmployeeDraft) -> ClientResult<Employee> {
        let response = self
            .client
            .put(format!("{}/{}", self.endpoint, id))
            .multipart(Self::form(draft)?)
            .send()
            .await?;
        Self::read(response).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        let response = self
            .client
            .delete(format!("{}/{}", self.endpoint, id))
            .send()
            .await?;
        let _: serde_json::Value = Self::read(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let api = HttpEmployeeApi::new("http://localhost:5000/");
        assert_eq!(api.endpoint(), "http://localhost:5000/api/employees");
    }

    #[test]
    fn test_status_error_displays_server_message() {
        let err = ClientError::Status {
            status: 404,
            message: "Employee not found".to_string(),
        };
        assert_eq!(err.to_string(), "Employee not found");
    }
}
