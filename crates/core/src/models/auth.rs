//! Authentication DTOs and the bearer credential.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::{require_text, validate_password_strength, MIN_PASSWORD_LENGTH};

/// Opaque bearer token issued by `POST /auth/token`.
///
/// `Debug` is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Response body of `POST /auth/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Form fields for `POST /auth/token`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// JSON body of `POST /auth/register`.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

/// Response body of `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub id: DbId,
    pub username: String,
}

/// The registration form as typed by the user, including the password
/// confirmation field that never leaves the client.
#[derive(Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    /// Check the form locally before anything is sent.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("Username", &self.username)?;
        if self.password != self.confirm_password {
            return Err(CoreError::Validation("Passwords do not match".into()));
        }
        validate_password_strength(&self.password, MIN_PASSWORD_LENGTH)
    }

    /// The request body; a blank e-mail is sent as `null`.
    pub fn to_request(&self) -> RegisterRequest {
        let email = self.email.trim();
        RegisterRequest {
            username: self.username.trim().to_string(),
            email: (!email.is_empty()).then(|| email.to_string()),
            password: self.password.clone(),
        }
    }
}
