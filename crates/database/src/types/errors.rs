//! Error types shared across the StaffDesk backend.

use std::fmt;
use thiserror::Error;

/// Field on which a uniqueness violation occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    Phone,
}

impl fmt::Display for ConflictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictField::Email => write!(f, "email"),
            ConflictField::Phone => write!(f, "phone"),
        }
    }
}

/// Errors raised by the employee directory and credential store.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DirectoryError {
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("registration using the reserved administrative email is not allowed")]
    ReservedEmail,

    #[error("{0} already exists")]
    Conflict(ConflictField),

    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(String),
}

impl DirectoryError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DirectoryError::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Authentication errors. Token verification failures are deliberately
/// collapsed into the single `Unauthorized` variant so that callers cannot
/// distinguish why a token was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unauthorized")]
    Unauthorized,

    #[error("user profile not found")]
    ProfileNotFound,

    #[error("database error: {0}")]
    Database(String),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
pub type AuthResult<T> = Result<T, AuthError>;

/// Map a named uniqueness constraint to the field it guards. The constraint
/// is the correctness backstop for concurrent inserts; there is no separate
/// existence probe before writing.
pub fn conflict_for_constraint(name: &str) -> Option<ConflictField> {
    match name {
        "users_email_key" | "credentials_email_key" => Some(ConflictField::Email),
        "users_phone_key" => Some(ConflictField::Phone),
        _ => None,
    }
}

impl From<sqlx::Error> for DirectoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DirectoryError::NotFound,
            sqlx::Error::Database(db_err) => {
                match db_err.constraint().and_then(conflict_for_constraint) {
                    Some(field) => DirectoryError::Conflict(field),
                    None => DirectoryError::Database(db_err.message().to_string()),
                }
            }
            _ => DirectoryError::Database(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Database(err.to_string())
    }
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound => AuthError::ProfileNotFound,
            DirectoryError::Database(message) => AuthError::Database(message),
            other => AuthError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_names_select_the_conflicting_field() {
        assert_eq!(
            conflict_for_constraint("users_email_key"),
            Some(ConflictField::Email)
        );
        assert_eq!(
            conflict_for_constraint("users_phone_key"),
            Some(ConflictField::Phone)
        );
        assert_eq!(
            conflict_for_constraint("credentials_email_key"),
            Some(ConflictField::Email)
        );
        assert_eq!(conflict_for_constraint("users_pkey"), None);
    }

    #[test]
    fn conflict_messages_name_the_field() {
        assert_eq!(
            DirectoryError::Conflict(ConflictField::Email).to_string(),
            "email already exists"
        );
        assert_eq!(
            DirectoryError::Conflict(ConflictField::Phone).to_string(),
            "phone already exists"
        );
    }

    #[test]
    fn validation_errors_name_the_field() {
        let error = DirectoryError::validation("salary_from", "must be an integer");
        assert_eq!(error.to_string(), "invalid salary_from: must be an integer");
    }

    #[test]
    fn migrations_declare_the_uniqueness_backstop() {
        let users_ddl = include_str!("../../migrations/0002_create_users.sql");
        assert!(users_ddl.contains("CONSTRAINT users_email_key UNIQUE (email)"));
        assert!(users_ddl.contains("CONSTRAINT users_phone_key UNIQUE (phone)"));

        let credentials_ddl = include_str!("../../migrations/0001_create_credentials.sql");
        assert!(credentials_ddl.contains("CONSTRAINT credentials_email_key UNIQUE (email)"));
    }
}
