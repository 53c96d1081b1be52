//! User administration dashboard.
//!
//! Every operation first checks that the session belongs to an admin; for
//! anyone else the dashboard reports access denied and sends nothing.

use std::sync::Arc;

use scenevault_client::{AccountApi, ClientError, Session};
use scenevault_core::error::CoreError;
use scenevault_core::models::auth::BearerToken;
use scenevault_core::models::user::User;
use scenevault_core::permissions::can_delete_user;
use scenevault_core::types::DbId;
use tokio::sync::Mutex;

use crate::confirm::ConfirmPrompt;
use crate::status::{client_reason, StatusMessage};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminSnapshot {
    pub users: Vec<User>,
    pub status: Option<StatusMessage>,
}

pub struct AdminDashboard<A> {
    api: Arc<A>,
    session: Arc<Session>,
    state: Mutex<AdminSnapshot>,
}

impl<A: AccountApi> AdminDashboard<A> {
    pub fn new(api: Arc<A>, session: Arc<Session>) -> Self {
        Self {
            api,
            session,
            state: Mutex::new(AdminSnapshot::default()),
        }
    }

    pub async fn snapshot(&self) -> AdminSnapshot {
        self.state.lock().await.clone()
    }

    /// Fetch all users.
    pub async fn load_users(&self) -> bool {
        let Some((token, _)) = self.require_admin().await else {
            return false;
        };
        match self.api.list_users(&token).await {
            Ok(users) => {
                let mut state = self.state.lock().await;
                state.users = users;
                state.status = None;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to list users");
                self.set_status(server_failure(&err)).await;
                false
            }
        }
    }

    /// Fetch a single user.
    pub async fn user(&self, id: DbId) -> Option<User> {
        let (token, _) = self.require_admin().await?;
        match self.api.get_user(&token, id).await {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!(user_id = id, error = %err, "Failed to fetch user");
                self.set_status(server_failure(&err)).await;
                None
            }
        }
    }

    /// Delete a non-admin user after confirmation.
    pub async fn delete_user(&self, id: DbId, confirm: impl ConfirmPrompt) -> bool {
        let Some((token, admin)) = self.require_admin().await else {
            return false;
        };

        let listed = self
            .state
            .lock()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned();
        let target = match listed {
            Some(user) => user,
            None => match self.user(id).await {
                Some(user) => user,
                None => return false,
            },
        };

        if !can_delete_user(&admin, &target) {
            self.set_status(CoreError::Forbidden("Administrators cannot be deleted".into()).into())
                .await;
            return false;
        }
        if !confirm.confirm(&format!("Delete user \"{}\"?", target.username)) {
            return false;
        }

        match self.api.delete_user(&token, id).await {
            Ok(()) => {
                tracing::info!(user_id = id, username = %target.username, "User deleted");
                let mut state = self.state.lock().await;
                state.users.retain(|u| u.id != id);
                state.status = Some(StatusMessage::success(format!(
                    "User \"{}\" deleted",
                    target.username
                )));
                true
            }
            Err(err) => {
                tracing::warn!(user_id = id, error = %err, "User deletion rejected");
                self.set_status(server_failure(&err)).await;
                false
            }
        }
    }

    async fn require_admin(&self) -> Option<(BearerToken, User)> {
        let refusal = match self.session.current().await {
            Some(signed_in) if signed_in.user.is_admin => {
                return Some((signed_in.token, signed_in.user));
            }
            Some(_) => CoreError::Forbidden("Access denied: administrators only".into()),
            None => CoreError::Unauthorized("Sign in as an administrator".into()),
        };
        self.set_status(refusal.into()).await;
        None
    }

    async fn set_status(&self, status: StatusMessage) {
        self.state.lock().await.status = Some(status);
    }
}

fn server_failure(err: &ClientError) -> StatusMessage {
    StatusMessage::error(client_reason(err))
}
