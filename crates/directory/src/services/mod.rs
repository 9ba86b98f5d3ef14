//! Business logic services for the directory crate.

pub mod auth_service;
pub mod employee_service;

pub use auth_service::{AuthService, LoginOutcome};
pub use employee_service::EmployeeService;
