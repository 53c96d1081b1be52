//! User account model and DTOs.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A user as returned by `GET /users/me` and the admin user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    /// Role label shown in the admin user table.
    pub fn role_label(&self) -> &'static str {
        if self.is_admin {
            "ADMIN"
        } else {
            "USER"
        }
    }

    /// Upper-cased first character of the username, used as an avatar.
    pub fn initial(&self) -> Option<char> {
        self.username.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

/// DTO for `PUT /users/me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfile {
    pub email: Option<String>,
}
