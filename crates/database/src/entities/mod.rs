//! Entity definitions for the StaffDesk database layer.

pub mod credential;
pub mod employee;

pub use credential::Credential;
pub use employee::{Employee, EmployeeInput, EmployeePayload, NumericInput};
