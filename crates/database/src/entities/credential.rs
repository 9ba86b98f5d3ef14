//! Credential entity definitions.

use chrono::{DateTime, Utc};

/// A stored login credential. `is_admin` replaces the historical
/// reserved-email comparison at login time; the literal survives only as the
/// configured bootstrap identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
