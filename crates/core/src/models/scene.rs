//! Scene entity model and DTOs.
//!
//! A scene is an annotated excerpt of a movie: a title, optional start/end
//! timestamps (display strings, never parsed), an optional video link and
//! still image, and a set of tags.

use serde::{Deserialize, Serialize};

use crate::entity::{Draft, Entity};
use crate::error::CoreError;
use crate::models::user::User;
use crate::permissions;
use crate::tags::TagSet;
use crate::types::DbId;
use crate::validation::require_text;
use crate::video;

/// Shown in place of a missing end timestamp.
const UNKNOWN_END: &str = "?";

/// A scene as returned by `GET /scenes` and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: DbId,
    pub movie_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub start_timestamp: Option<String>,
    pub end_timestamp: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: TagSet,
    /// Set by the server from the authenticated user at creation.
    pub created_by: Option<DbId>,
}

/// DTO for creating or updating a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDraft {
    pub movie_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub start_timestamp: Option<String>,
    pub end_timestamp: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: TagSet,
}

impl Scene {
    /// `"01:20:00 - 01:25:00"`. A missing start is left blank, a missing
    /// end shows as `?`.
    pub fn time_range(&self) -> String {
        let start = non_empty(self.start_timestamp.as_deref()).unwrap_or_default();
        let end = non_empty(self.end_timestamp.as_deref()).unwrap_or(UNKNOWN_END);
        format!("{start} - {end}")
    }

    /// Embeddable player URL when `video_url` is a YouTube link.
    pub fn embed_url(&self) -> Option<String> {
        self.video_url.as_deref().and_then(video::embed_url)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl Draft for SceneDraft {
    fn validate(&self) -> Result<(), CoreError> {
        if self.movie_id.is_none() {
            return Err(CoreError::Validation("Choose a movie for the scene".into()));
        }
        require_text("Title", &self.title)
    }

    /// Keep the selected movie so several scenes of one film can be added
    /// in a row.
    fn after_submit(&self) -> Self {
        Self {
            movie_id: self.movie_id,
            ..Self::default()
        }
    }
}

impl Entity for Scene {
    type Draft = SceneDraft;

    const COLLECTION: &'static str = "scenes";
    const NAME: &'static str = "Scene";

    fn id(&self) -> DbId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn to_draft(&self) -> SceneDraft {
        SceneDraft {
            movie_id: Some(self.movie_id),
            title: self.title.clone(),
            description: self.description.clone(),
            start_timestamp: self.start_timestamp.clone(),
            end_timestamp: self.end_timestamp.clone(),
            video_url: self.video_url.clone(),
            image_url: self.image_url.clone(),
            tags: self.tags.clone(),
        }
    }

    fn can_modify(&self, user: &User) -> bool {
        permissions::can_modify_scene(user, self.created_by)
    }
}
