//! Form validation helpers shared by the drafts and account forms.

use crate::error::CoreError;

/// Minimum password length accepted by the registration form.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Fail when a required text field is empty or whitespace only.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validate that a password meets the minimum length, counted in characters.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {min_length} characters long"
        )));
    }
    Ok(())
}
