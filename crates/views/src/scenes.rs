//! Scenes screen: the scene list plus the movie lookup used to label each
//! scene and to fill the movie picker of the create form.

use std::sync::Arc;

use scenevault_client::{CatalogApi, ResourceApi, Session};
use scenevault_core::models::movie::Movie;
use scenevault_core::models::scene::Scene;
use scenevault_core::pagination::{PageWindow, MOVIE_LOOKUP_LIMIT};
use scenevault_core::types::DbId;
use tokio::sync::Mutex;

use crate::list::{ListController, ReloadOutcome};

pub struct ScenesView<A> {
    api: Arc<A>,
    list: ListController<Scene, A>,
    movies: Mutex<Vec<Movie>>,
}

impl<A: CatalogApi> ScenesView<A> {
    pub fn new(api: Arc<A>, session: Arc<Session>) -> Self {
        Self {
            list: ListController::scenes(api.clone(), session),
            api,
            movies: Mutex::new(Vec::new()),
        }
    }

    /// The underlying list controller (search, paging, drafts, writes).
    pub fn list(&self) -> &ListController<Scene, A> {
        &self.list
    }

    /// Reload the current scene page and the movie lookup concurrently.
    ///
    /// The outcome reported is the scene page's.
    pub async fn load(&self) -> ReloadOutcome {
        let (outcome, _) = futures::join!(self.list.reload(), self.refresh_movies());
        outcome
    }

    /// Fetch the first 100 movies. A failed fetch keeps the previous lookup.
    pub async fn refresh_movies(&self) -> bool {
        let window = PageWindow::first(MOVIE_LOOKUP_LIMIT);
        match ResourceApi::<Movie>::list(&*self.api, window).await {
            Ok(page) => {
                *self.movies.lock().await = page.data;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load movie lookup");
                false
            }
        }
    }

    pub async fn movies(&self) -> Vec<Movie> {
        self.movies.lock().await.clone()
    }

    /// Title of the movie a scene belongs to, as far as the lookup knows.
    pub async fn movie_title(&self, movie_id: DbId) -> String {
        self.movies
            .lock()
            .await
            .iter()
            .find(|m| m.id == movie_id)
            .map(|m| m.title.clone())
            .unwrap_or_else(|| format!("Unknown movie (#{movie_id})"))
    }

    /// Pick the movie on the create form.
    pub async fn select_movie(&self, movie_id: DbId) {
        let mut draft = self.list.new_draft().await;
        draft.movie_id = Some(movie_id);
        self.list.set_new_draft(draft).await;
    }

    /// Embeddable player for the scene's video link, if it is a YouTube URL.
    pub fn embed_url(scene: &Scene) -> Option<String> {
        scene.embed_url()
    }
}
