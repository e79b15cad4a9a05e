use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{MessageResponse, Result};
use crate::models::{Employee, EmployeeSubmission};
use crate::services::EmployeeService;
use crate::AppState;

/// List all employees
/// GET /api/employees
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>> {
    let employees = EmployeeService::list(state.employees.as_ref()).await?;
    Ok(Json(employees))
}

/// Create an employee from a multipart (or JSON) form
/// POST /api/employees
pub async fn create_employee(
    State(state): State<AppState>,
    submission: EmployeeSubmission,
) -> Result<(StatusCode, Json<Employee>)> {
    let employee =
        EmployeeService::create(state.employees.as_ref(), state.photos.as_ref(), submission)
            .await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Overwrite an employee, optionally replacing the photo
/// PUT /api/employees/:id
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    submission: EmployeeSubmission,
) -> Result<Json<Employee>> {
    let mutation = EmployeeService::update(
        state.employees.as_ref(),
        state.photos.as_ref(),
        &id,
        submission,
    )
    .await?;
    Ok(Json(mutation.logged()))
}

/// Delete an employee. Answers with the same confirmation whether or not
/// the id matched anything.
/// DELETE /api/employees/:id
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    EmployeeService::delete(state.employees.as_ref(), state.photos.as_ref(), &id)
        .await?
        .logged();
    Ok(Json(MessageResponse::new("Employee deleted")))
}
