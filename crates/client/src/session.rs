//! The signed-in user and their bearer credential.
//!
//! A [`Session`] is created once by the application and passed explicitly
//! (as `Arc<Session>`) into every view controller that needs to know who is
//! signed in or needs a credential for a write.

use scenevault_core::models::auth::BearerToken;
use scenevault_core::models::user::User;
use tokio::sync::RwLock;

/// Credential and identity of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub token: BearerToken,
    pub user: User,
}

/// Current authentication state, shared by the controllers of one app.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc`.
#[derive(Debug, Default)]
pub struct Session {
    state: RwLock<Option<SignedIn>>,
}

impl Session {
    /// A session nobody is signed in to.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session that starts out signed in.
    pub fn signed_in(token: BearerToken, user: User) -> Self {
        Self {
            state: RwLock::new(Some(SignedIn { token, user })),
        }
    }

    pub async fn current(&self) -> Option<SignedIn> {
        self.state.read().await.clone()
    }

    pub async fn token(&self) -> Option<BearerToken> {
        self.state.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.as_ref().map(|s| s.user.clone())
    }

    pub async fn is_signed_in(&self) -> bool {
        self.state.read().await.is_some()
    }

    pub async fn is_admin(&self) -> bool {
        self.state
            .read()
            .await
            .as_ref()
            .is_some_and(|s| s.user.is_admin)
    }

    /// Replace the current state with a freshly authenticated user.
    pub async fn sign_in(&self, token: BearerToken, user: User) {
        tracing::info!(user_id = user.id, username = %user.username, "Signed in");
        *self.state.write().await = Some(SignedIn { token, user });
    }

    pub async fn sign_out(&self) {
        if let Some(previous) = self.state.write().await.take() {
            tracing::info!(user_id = previous.user.id, "Signed out");
        }
    }

    /// Apply a local change to the signed-in user (e.g. after a profile
    /// update). Does nothing when nobody is signed in.
    pub async fn update_user(&self, update: impl FnOnce(&mut User)) {
        if let Some(state) = self.state.write().await.as_mut() {
            update(&mut state.user);
        }
    }
}
