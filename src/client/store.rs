//! Client-side employee store.
//!
//! [`EmployeesState`] is a plain reducer over [`StoreAction`]s. [`EmployeeStore`]
//! wraps it with the four asynchronous thunks, each of which dispatches
//! `Pending`, awaits the API without holding the state lock, then dispatches a
//! fulfilled or `Rejected` action. Thunks running concurrently overwrite
//! `loading`/`error` in whatever order they finish.

use tokio::sync::Mutex;

use crate::client::api::{ClientError, ClientResult, EmployeeApi, EmployeeDraft};
use crate::models::Employee;

/// Which asynchronous operation an action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thunk {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Thunk {
    pub fn default_error(self) -> &'static str {
        match self {
            Thunk::Fetch => "Failed to fetch employees",
            Thunk::Create => "Failed to create employee",
            Thunk::Update => "Failed to update employee",
            Thunk::Delete => "Failed to delete employee",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    Pending(Thunk),
    FetchFulfilled(Vec<Employee>),
    CreateFulfilled(Employee),
    UpdateFulfilled(Employee),
    DeleteFulfilled(String),
    Rejected(Thunk, Option<String>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeesState {
    pub employees: Vec<Employee>,
    pub loading: bool,
    pub error: Option<String>,
}

impl EmployeesState {
    pub fn apply(&mut self, action: StoreAction) {
        match action {
            StoreAction::Pending(_) => {
                self.loading = true;
                self.error = None;
            }
            StoreAction::FetchFulfilled(employees) => {
                self.loading = false;
                self.employees = employees;
            }
            StoreAction::CreateFulfilled(employee) => {
                self.loading = false;
                self.employees.push(employee);
            }
            StoreAction::UpdateFulfilled(employee) => {
                self.loading = false;
                // An unknown id leaves the list stale until the next fetch
                if let Some(slot) = self.employees.iter_mut().find(|e| e.id == employee.id) {
                    *slot = employee;
                }
            }
            StoreAction::DeleteFulfilled(id) => {
                self.loading = false;
                self.employees.retain(|e| e.id != id);
            }
            StoreAction::Rejected(thunk, message) => {
                self.loading = false;
                self.error = Some(
                    message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| thunk.default_error().to_string()),
                );
            }
        }
    }
}

pub struct EmployeeStore<A> {
    api: A,
    state: Mutex<EmployeesState>,
}

impl<A: EmployeeApi> EmployeeStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(EmployeesState::default()),
        }
    }

    /// Copy of the current state
    pub async fn state(&self) -> EmployeesState {
        self.state.lock().await.clone()
    }

    pub async fn dispatch(&self, action: StoreAction) {
        tracing::trace!("dispatch {:?}", action);
        self.state.lock().await.apply(action);
    }

    async fn settle<T>(
        &self,
        thunk: Thunk,
        result: ClientResult<T>,
        fulfilled: impl FnOnce(&T) -> StoreAction,
    ) -> ClientResult<T> {
        match &result {
            Ok(value) => self.dispatch(fulfilled(value)).await,
            Err(e) => {
                tracing::warn!("{}: {}", thunk.default_error(), e);
                self.dispatch(StoreAction::Rejected(thunk, Some(e.to_string())))
                    .await
            }
        }
        result
    }

    pub async fn fetch_employees(&self) -> ClientResult<Vec<Employee>> {
        self.dispatch(StoreAction::Pending(Thunk::Fetch)).await;
        let result = self.api.list().await;
        self.settle(Thunk::Fetch, result, |list| {
            StoreAction::FetchFulfilled(list.clone())
        })
        .await
    }

    pub async fn add_employee(&self, draft: &EmployeeDraft) -> ClientResult<Employee> {
        self.dispatch(StoreAction::Pending(Thunk::Create)).await;
        let result = self.api.create(draft).await;
        self.settle(Thunk::Create, result, |e| {
            StoreAction::CreateFulfilled(e.clone())
        })
        .await
    }

    pub async fn edit_employee(&self, id: &str, draft: &EmployeeDraft) -> ClientResult<Employee> {
        self.dispatch(StoreAction::Pending(Thunk::Update)).await;
        let result = if id.is_empty() {
            Err(ClientError::Invalid(
                "Employee id is required for update".to_string(),
            ))
        } else {
            self.api.update(id, draft).await
        };
        self.settle(Thunk::Update, result, |e| {
            StoreAction::UpdateFulfilled(e.clone())
        })
        .await
    }

    pub async fn remove_employee(&self, id: &str) -> ClientResult<()> {
        self.dispatch(StoreAction::Pending(Thunk::Delete)).await;
        let result = self.api.delete(id).await;
        self.settle(Thunk::Delete, result, |_| {
            StoreAction::DeleteFulfilled(id.to_string())
        })
        .await
    }
}
