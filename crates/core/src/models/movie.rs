//! Movie entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::entity::{Draft, Entity};
use crate::error::CoreError;
use crate::models::user::User;
use crate::permissions;
use crate::types::DbId;
use crate::validation::require_text;

/// A movie as returned by `GET /movies` and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    /// Running time in minutes.
    pub duration: Option<i32>,
    /// Free-text genre list, e.g. `"action, sci-fi"`.
    pub genres: Option<String>,
    pub imdb_rating: Option<f64>,
}

/// DTO for creating or updating a movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub title: String,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub duration: Option<i32>,
    pub genres: Option<String>,
    pub imdb_rating: Option<f64>,
}

impl Movie {
    /// `"Title (1999)"`, or just the title when the year is unknown.
    pub fn display_title(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({year})", self.title),
            None => self.title.clone(),
        }
    }
}

impl Draft for MovieDraft {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("Title", &self.title)?;
        if let Some(rating) = self.imdb_rating {
            if !(0.0..=10.0).contains(&rating) {
                return Err(CoreError::Validation(
                    "IMDb rating must be between 0 and 10".into(),
                ));
            }
        }
        Ok(())
    }
}

impl Entity for Movie {
    type Draft = MovieDraft;

    const COLLECTION: &'static str = "movies";
    const NAME: &'static str = "Movie";

    fn id(&self) -> DbId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn to_draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.clone(),
            year: self.year,
            director: self.director.clone(),
            description: self.description.clone(),
            poster_url: self.poster_url.clone(),
            duration: self.duration,
            genres: self.genres.clone(),
            imdb_rating: self.imdb_rating,
        }
    }

    fn can_modify(&self, user: &User) -> bool {
        permissions::can_modify_movie(user)
    }
}
