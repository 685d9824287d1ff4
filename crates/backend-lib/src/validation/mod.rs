// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request body validation.
//!
//! Runs before the auth service sees a request. Values are checked, never
//! rewritten: emails keep their case and surrounding text is not trimmed.

use credentials_common::Credentials;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Possible validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email address cannot be empty".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email address cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a password. Any non-empty string up to the length cap is accepted.
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    if password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "Password must not be empty".to_string(),
        ));
    }

    if password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(password)
}

/// Validate a signup or signin body
pub fn validate_credentials(credentials: &Credentials) -> ValidationResult<()> {
    validate_email(&credentials.email)?;
    validate_password(&credentials.password)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name+tag@example.co.uk").is_ok());
        assert!(validate_email("Mixed.Case@Example.COM").is_ok());

        // no @
        assert!(matches!(
            validate_email("test.example.com"),
            Err(ValidationError::InvalidEmail(_))
        ));

        // no domain
        assert!(matches!(
            validate_email("test@"),
            Err(ValidationError::InvalidEmail(_))
        ));

        // no TLD
        assert!(matches!(
            validate_email("test@example"),
            Err(ValidationError::InvalidEmail(_))
        ));

        // surrounding whitespace is not trimmed away
        assert!(validate_email(" test@example.com").is_err());
        assert!(validate_email("").is_err());

        let long = format!("{}@example.com", "a".repeat(250));
        assert!(validate_email(&long).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("pass").is_ok());
        assert!(validate_password("a").is_ok());
        assert!(matches!(
            validate_password(""),
            Err(ValidationError::InvalidPassword(_))
        ));
        assert!(validate_password(&"x".repeat(MAX_PASSWORD_LENGTH)).is_ok());
        assert!(validate_password(&"x".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_password_length_counts_characters() {
        // two bytes per character
        let accented = "é".repeat(MAX_PASSWORD_LENGTH);
        assert!(accented.len() > MAX_PASSWORD_LENGTH);
        assert!(validate_password(&accented).is_ok());
        assert!(validate_password(&"é".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_credentials() {
        let ok = Credentials {
            email: "asdfg@asdfg.com".to_string(),
            password: "pass".to_string(),
        };
        assert!(validate_credentials(&ok).is_ok());

        let bad_email = Credentials {
            email: "nope".to_string(),
            ..ok.clone()
        };
        assert!(matches!(
            validate_credentials(&bad_email),
            Err(ValidationError::InvalidEmail(_))
        ));

        let bad_password = Credentials {
            password: String::new(),
            ..ok
        };
        assert!(matches!(
            validate_credentials(&bad_password),
            Err(ValidationError::InvalidPassword(_))
        ));
    }
}
