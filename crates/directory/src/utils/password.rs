//! Password hashing and verification utilities.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use staffdesk_database::{DirectoryError, DirectoryResult};

/// Hash a password using Argon2.
pub fn hash_password(password: &str) -> DirectoryResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| DirectoryError::Database("password hashing failed".to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its stored hash. An unparseable hash counts as
/// a mismatch rather than an error; callers treat both as bad credentials.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_round_trips() {
        let hash = hash_password("longenough1!").unwrap();

        assert!(verify_password("longenough1!", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let first = hash_password("longenough1!").unwrap();
        let second = hash_password("longenough1!").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn garbage_hash_is_a_mismatch() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
