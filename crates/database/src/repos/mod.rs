//! Repository implementations for the StaffDesk database layer.

pub mod credential_repository;
pub mod employee_repository;

pub use credential_repository::CredentialRepository;
pub use employee_repository::EmployeeRepository;
