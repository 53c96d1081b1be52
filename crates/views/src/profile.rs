//! Profile page of the signed-in user.

use std::sync::Arc;

use scenevault_client::{AccountApi, Session};
use scenevault_core::error::CoreError;
use scenevault_core::models::user::{UpdateProfile, User};
use tokio::sync::Mutex;

use crate::status::{client_reason, StatusMessage};

pub struct ProfileView<A> {
    api: Arc<A>,
    session: Arc<Session>,
    status: Mutex<Option<StatusMessage>>,
}

impl<A: AccountApi> ProfileView<A> {
    pub fn new(api: Arc<A>, session: Arc<Session>) -> Self {
        Self {
            api,
            session,
            status: Mutex::new(None),
        }
    }

    pub async fn user(&self) -> Option<User> {
        self.session.user().await
    }

    pub async fn status(&self) -> Option<StatusMessage> {
        self.status.lock().await.clone()
    }

    /// Save a new e-mail address. A blank address clears it.
    pub async fn update_email(&self, email: &str) -> bool {
        let Some(token) = self.session.token().await else {
            self.set_status(CoreError::Unauthorized("Sign in to edit your profile".into()).into())
                .await;
            return false;
        };

        let email = email.trim();
        let update = UpdateProfile {
            email: (!email.is_empty()).then(|| email.to_string()),
        };

        match self.api.update_profile(&token, &update).await {
            Ok(()) => {
                let saved = update.email.clone();
                self.session.update_user(|user| user.email = saved).await;
                tracing::info!("Profile updated");
                self.set_status(StatusMessage::success("Profile updated successfully"))
                    .await;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Profile update rejected");
                self.set_status(StatusMessage::error(format!(
                    "Could not save your profile: {}",
                    client_reason(&err)
                )))
                .await;
                false
            }
        }
    }

    async fn set_status(&self, status: StatusMessage) {
        *self.status.lock().await = Some(status);
    }
}
