//! Credential repository for database operations.

use sqlx::{PgPool, Row};

use crate::entities::credential::Credential;
use crate::types::errors::{DirectoryError, DirectoryResult};

/// Repository for stored login credentials.
#[derive(Clone)]
pub struct CredentialRepository {
    pool: PgPool,
}

impl CredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> DirectoryResult<Option<Credential>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, is_admin, created_at, updated_at FROM credentials WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Credential {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                password_hash: row.try_get("password_hash")?,
                is_admin: row.try_get("is_admin")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })),
            None => Ok(None),
        }
    }

    pub async fn email_exists(&self, email: &str) -> DirectoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM credentials WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Insert a credential. Duplicate emails surface the table's uniqueness
    /// violation as a conflict.
    pub async fn insert(&self, email: &str, password_hash: &str, is_admin: bool) -> DirectoryResult<()> {
        sqlx::query(
            "INSERT INTO credentials (email, password_hash, is_admin, created_at, updated_at) VALUES ($1, $2, $3, NOW(), NOW())",
        )
        .bind(email)
        .bind(password_hash)
        .bind(is_admin)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update_password(&self, email: &str, password_hash: &str) -> DirectoryResult<()> {
        let result = sqlx::query(
            "UPDATE credentials SET password_hash = $1, updated_at = NOW() WHERE email = $2",
        )
        .bind(password_hash)
        .bind(email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::NotFound);
        }

        Ok(())
    }
}
