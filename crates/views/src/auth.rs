//! Sign-in, registration, sign-out and session restore.

use std::sync::Arc;

use scenevault_client::{AccountApi, ClientError, Session};
use scenevault_core::models::auth::{BearerToken, LoginRequest, RegistrationForm};
use scenevault_core::models::user::User;

use crate::status::{client_reason, StatusMessage};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AuthService<A> {
    api: Arc<A>,
    session: Arc<Session>,
}

impl<A: AccountApi> AuthService<A> {
    pub fn new(api: Arc<A>, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    /// Exchange credentials for a token, load the user and sign in.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, StatusMessage> {
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let issued = self.api.login(&request).await.map_err(|err| {
            tracing::warn!(username = %request.username, error = %err, "Login failed");
            login_failure(&err)
        })?;

        let token = BearerToken::new(issued.access_token);
        let user = self.api.current_user(&token).await.map_err(|err| {
            StatusMessage::error(format!(
                "Could not load your profile: {}",
                client_reason(&err)
            ))
        })?;

        self.session.sign_in(token, user.clone()).await;
        Ok(user)
    }

    /// Validate the form, create the account, then sign in with it.
    pub async fn register(&self, form: &RegistrationForm) -> Result<User, StatusMessage> {
        form.validate()?;

        let request = form.to_request();
        let created = self.api.register(&request).await.map_err(|err| {
            tracing::warn!(username = %request.username, error = %err, "Registration failed");
            let reason = match err.detail() {
                Some(detail) => detail.to_string(),
                None => "the username may already be taken".to_string(),
            };
            StatusMessage::error(format!("Registration failed: {reason}"))
        })?;
        tracing::info!(user_id = created.id, username = %created.username, "Account registered");

        self.login(&request.username, &request.password).await
    }

    pub async fn logout(&self) {
        self.session.sign_out().await;
    }

    /// Sign in again with a stored token.
    pub async fn restore(&self, token: &str) -> Result<User, StatusMessage> {
        let token = BearerToken::new(token.trim());
        match self.api.current_user(&token).await {
            Ok(user) => {
                self.session.sign_in(token, user.clone()).await;
                Ok(user)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Stored token rejected");
                self.session.sign_out().await;
                Err(StatusMessage::error(format!(
                    "Stored session is no longer valid: {}",
                    client_reason(&err)
                )))
            }
        }
    }
}

/// Rejected credentials get the generic message; anything else says what
/// went wrong.
fn login_failure(err: &ClientError) -> StatusMessage {
    match err.status() {
        Some(400 | 401 | 403) => StatusMessage::error(INVALID_CREDENTIALS),
        _ => StatusMessage::error(format!("Could not sign in: {}", client_reason(err))),
    }
}
