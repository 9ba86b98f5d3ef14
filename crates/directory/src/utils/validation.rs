//! Input validation utilities.

use regex::Regex;

use staffdesk_database::{DirectoryError, DirectoryResult};

const SPECIAL_CHARACTERS: &str = "!@#$%^&*";

/// Validate email format.
pub fn validate_email(email: &str) -> DirectoryResult<()> {
    if email.len() > 255 {
        return Err(DirectoryError::validation("email", "is too long"));
    }

    let email_regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .map_err(|_| DirectoryError::validation("email", "validation unavailable"))?;

    if !email_regex.is_match(email) {
        return Err(DirectoryError::validation("email", "is not a valid address"));
    }

    Ok(())
}

/// Validate the password policy, reporting the first rule that fails.
///
/// The same policy applies at every entry point that accepts a password:
/// registration, password change, and the administrator bootstrap.
pub fn validate_password(password: &str) -> DirectoryResult<()> {
    if password.len() < 8 {
        return Err(DirectoryError::validation(
            "password",
            "must be at least 8 characters long",
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(DirectoryError::validation(
            "password",
            "must contain at least one number",
        ));
    }

    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err(DirectoryError::validation(
            "password",
            "must contain at least one special character (!@#$%^&*)",
        ));
    }

    Ok(())
}
