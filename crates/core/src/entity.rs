//! Traits shared by the catalog resources (movies and scenes).
//!
//! The list controller and the HTTP client are generic over [`Entity`], so
//! one implementation serves both `/movies` and `/scenes`.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CoreError;
use crate::models::user::User;
use crate::types::DbId;

/// A catalog record stored by the API.
pub trait Entity: DeserializeOwned + Serialize + Clone + Debug + Send + Sync + 'static {
    /// Form type used to create or edit this entity.
    type Draft: Draft;

    /// Path segment of the REST collection, e.g. `"movies"`.
    const COLLECTION: &'static str;

    /// Human-readable singular name used in messages and errors.
    const NAME: &'static str;

    fn id(&self) -> DbId;

    fn title(&self) -> &str;

    /// A draft pre-filled from this entity, for the edit form.
    fn to_draft(&self) -> Self::Draft;

    /// Whether `user` may update or delete this record.
    fn can_modify(&self, user: &User) -> bool;
}

/// An in-progress create/edit form.
pub trait Draft: Serialize + Default + Clone + Debug + Send + Sync + 'static {
    /// Check required fields before anything is sent to the API.
    fn validate(&self) -> Result<(), CoreError>;

    /// The draft to show after a successful create. Defaults to a blank form.
    fn after_submit(&self) -> Self {
        Self::default()
    }
}
