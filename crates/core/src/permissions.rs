//! Client-side mirror of the API's permission rules.
//!
//! The API is the authority; these checks only decide which edit and
//! delete actions the views offer.

use crate::models::user::User;
use crate::types::DbId;

/// Movies can be edited and deleted by admins only.
pub fn can_modify_movie(user: &User) -> bool {
    user.is_admin
}

/// Scenes can be edited and deleted by their creator or an admin.
pub fn can_modify_scene(user: &User, created_by: Option<DbId>) -> bool {
    user.is_admin || created_by == Some(user.id)
}

/// Admins cannot be deleted from the dashboard.
pub fn can_delete_user(actor: &User, target: &User) -> bool {
    actor.is_admin && !target.is_admin
}
