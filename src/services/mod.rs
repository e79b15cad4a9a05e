pub mod employee;
pub mod upload;

pub use employee::{EmployeeService, Mutation};
pub use upload::{PhotoCleanup, UploadService};
