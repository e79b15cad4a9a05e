//! Client side of the directory: the API seam, the state store, and the
//! renderer-agnostic form and list logic built on top of it.

pub mod api;
pub mod form;
pub mod list;
pub mod store;

pub use api::{ClientError, ClientResult, EmployeeApi, EmployeeDraft, HttpEmployeeApi};
pub use form::{EmployeeForm, FormError, FormSubmission};
pub use list::{EmployeeList, EmployeeRow, ListView};
pub use store::{EmployeeStore, EmployeesState, StoreAction, Thunk};
