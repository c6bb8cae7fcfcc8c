//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Password limits follow the account policy: 10..=100 chars, common
//! passwords rejected before hashing.

use validator::ValidateEmail;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Display names
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 10;
pub const MAX_PASSWORD_LEN: usize = 100;

/// Passwords rejected outright regardless of length.
///
/// Covers the worst offenders from public breach corpora; length rules
/// already exclude most of the usual top-100 list.
const COMMON_PASSWORDS: &[&str] = &[
    "1234567890",
    "qwertyuiop",
    "password123",
    "administrator",
    "welcome123",
    "iloveyou123",
    "letmein123",
    "qwerty123456",
    "password1234",
    "changeme123",
];

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate an email address (required, length, format).
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    if !value.validate_email() {
        return Err(AppError::validation(format!(
            "'{value}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate a plaintext password before hashing.
///
/// Enforces 10..=100 chars and rejects known-common passwords
/// (case-insensitive).
pub fn validate_password(value: &str) -> Result<(), AppError> {
    if value.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too short ({} chars, min {MIN_PASSWORD_LEN})",
            value.len()
        )));
    }
    if value.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long ({} chars, max {MAX_PASSWORD_LEN})",
            value.len()
        )));
    }
    let lowered = value.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        return Err(AppError::validation(
            "password is too common, pick another one",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_empty() {
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Jane", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_required_text_rejects_too_long() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("jane@example.edu").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(validate_password("short1").is_err()); // 6 chars
        assert!(validate_password("exactly10!").is_ok()); // 10 chars
        let max = "x".repeat(MAX_PASSWORD_LEN);
        assert!(validate_password(&max).is_ok());
        let too_long = "x".repeat(MAX_PASSWORD_LEN + 1);
        assert!(validate_password(&too_long).is_err());
    }

    #[test]
    fn test_password_rejects_common() {
        assert!(validate_password("password123").is_err());
        assert!(validate_password("PASSWORD123").is_err()); // case-insensitive
        assert!(validate_password("tr0ub4dor&3xtra").is_ok());
    }
}
