//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits are
//! applied here before anything reaches the store.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: area labels and similar short identifiers
pub const MAX_NAME_LEN: usize = 100;

/// Usernames
pub const MAX_USERNAME_LEN: usize = 50;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Slot feature list ("window, quiet, sofa")
pub const MAX_FEATURES_LEN: usize = 200;

/// Review comments
pub const MAX_COMMENT_LEN: usize = 2000;

// ── Validation helpers ──────────────────────────────────────────────

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

/// Validate that a possibly-empty string is within the length limit.
pub fn validate_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("patio", "area", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("", "area", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "area", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(101), "area", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_validate_text_allows_empty() {
        assert!(validate_text("", "comment", MAX_COMMENT_LEN).is_ok());
        assert!(validate_text("fine", "comment", MAX_COMMENT_LEN).is_ok());
        assert!(validate_text(&"x".repeat(2001), "comment", MAX_COMMENT_LEN).is_err());
    }
}
