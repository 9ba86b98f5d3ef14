//! Authentication service: login, registration, password management and the
//! administrator bootstrap.

use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

use staffdesk_database::{
    AuthError, AuthResult, CredentialRepository, DirectoryError, DirectoryResult, Employee,
    EmployeeRepository,
};

use crate::utils::jwt::TokenManager;
use crate::utils::{password, validation};

/// Result of a successful login. Administrators receive a bare token; regular
/// accounts also carry their directory profile.
#[derive(Debug)]
pub enum LoginOutcome {
    Admin { token: String },
    Employee { token: String, profile: Employee },
}

/// Service for credential authentication and account management.
pub struct AuthService {
    credentials: CredentialRepository,
    employees: EmployeeRepository,
    tokens: Arc<TokenManager>,
    admin_email: String,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenManager>, admin_email: String) -> Self {
        Self {
            credentials: CredentialRepository::new(pool.clone()),
            employees: EmployeeRepository::new(pool),
            tokens,
            admin_email,
        }
    }

    /// Authenticate an email/password pair and issue a token.
    ///
    /// A missing credential and a wrong password are indistinguishable to the
    /// caller. A valid credential without a directory profile is the one
    /// distinct failure: it points at an inconsistency, not at the caller.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<LoginOutcome> {
        let Some(credential) = self.credentials.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify_password(password, &credential.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        if credential.is_admin {
            let token = self.tokens.issue(email)?;
            info!(email = %email, "administrator logged in");
            return Ok(LoginOutcome::Admin { token });
        }

        let profile = self
            .employees
            .find_by_email(email)
            .await?
            .ok_or(AuthError::ProfileNotFound)?;

        let token = self.tokens.issue(email)?;
        info!(email = %email, "employee logged in");
        Ok(LoginOutcome::Employee { token, profile })
    }

    /// Register a new credential. The reserved administrative email is
    /// rejected outright; everything else passes the shared validation
    /// boundary (email format + password policy) before hashing.
    pub async fn register(&self, email: &str, password: &str) -> DirectoryResult<()> {
        if email == self.admin_email {
            return Err(DirectoryError::ReservedEmail);
        }

        validation::validate_email(email)?;
        validation::validate_password(password)?;

        let password_hash = password::hash_password(password)?;
        self.credentials.insert(email, &password_hash, false).await?;

        info!(email = %email, "credential registered");
        Ok(())
    }

    /// Change the password of the authenticated identity.
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> DirectoryResult<()> {
        let credential = self
            .credentials
            .find_by_email(email)
            .await?
            .ok_or(DirectoryError::NotFound)?;

        if !password::verify_password(old_password, &credential.password_hash) {
            return Err(DirectoryError::validation(
                "oldPassword",
                "is incorrect",
            ));
        }

        validation::validate_password(new_password)?;

        let password_hash = password::hash_password(new_password)?;
        self.credentials.update_password(email, &password_hash).await?;

        info!(email = %email, "password changed");
        Ok(())
    }

    /// Whether a credential exists for the given email.
    pub async fn check_email(&self, email: &str) -> DirectoryResult<bool> {
        self.credentials.email_exists(email).await
    }

    /// Whether a directory profile exists for the given email.
    pub async fn check_profile_email(&self, email: &str) -> DirectoryResult<bool> {
        self.employees.email_exists(email).await
    }

    /// Ensure the administrative credential exists at startup. The password
    /// policy applies here as everywhere; a violation is surfaced to the
    /// caller, which treats it as fatal.
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> DirectoryResult<()> {
        validation::validate_password(password)?;

        if self.credentials.email_exists(email).await? {
            info!("administrator credential already present, skipping bootstrap");
            return Ok(());
        }

        let password_hash = password::hash_password(password)?;
        self.credentials.insert(email, &password_hash, true).await?;

        warn!(email = %email, "administrator credential registered");
        Ok(())
    }
}
