//! # StaffDesk Database Crate
//!
//! Persistence layer for the StaffDesk backend: connection management,
//! embedded migrations, the filter-query builder for the employee listing,
//! and repository implementations over the `users` and `credentials` tables.

use anyhow::Result;
use sqlx::PgPool;
use staffdesk_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod query;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use entities::{Credential, Employee, EmployeeInput, EmployeePayload, NumericInput};
pub use query::{build_user_query, FilterQuery, Page, SqlParam, UserFilters};
pub use repos::{CredentialRepository, EmployeeRepository};
pub use types::{
    conflict_for_constraint, AuthError, AuthResult, ConflictField, DirectoryError,
    DirectoryResult,
};

/// Connect and bring the schema up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = prepare_database(config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
