pub mod employee;
pub mod form;
