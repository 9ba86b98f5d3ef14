//! Shared types for the StaffDesk database layer.

pub mod errors;

pub use errors::{
    conflict_for_constraint, AuthError, AuthResult, ConflictField, DirectoryError,
    DirectoryResult,
};
