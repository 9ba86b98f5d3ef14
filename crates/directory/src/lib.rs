//! # StaffDesk Directory Crate
//!
//! Domain services for the StaffDesk backend: credential authentication with
//! bearer tokens, the employee directory, password hashing and the shared
//! validation boundary.
//!
//! ## Architecture
//!
//! - **Services**: business logic ([`AuthService`], [`EmployeeService`])
//! - **Utils**: token issuing/verification, password hashing, input validation

pub mod services;
pub mod utils;

// Re-export database types callers commonly need alongside the services.
pub use staffdesk_database::{
    AuthError, AuthResult, ConflictField, Credential, DirectoryError, DirectoryResult, Employee,
    EmployeeInput, EmployeePayload, NumericInput, Page, UserFilters,
};

pub use services::{AuthService, EmployeeService, LoginOutcome};
pub use utils::jwt::TokenManager;
