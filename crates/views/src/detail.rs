//! Movie and scene detail pages.

use std::sync::Arc;

use scenevault_client::{CatalogApi, ResourceApi};
use scenevault_core::models::movie::Movie;
use scenevault_core::models::scene::Scene;
use scenevault_core::pagination::{PageWindow, SCENE_LOOKUP_LIMIT};
use scenevault_core::types::DbId;
use tokio::sync::Mutex;

use crate::status::client_reason;

/// Load state of a detail page.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail<T> {
    Loading,
    Loaded(T),
    NotFound,
    Failed(String),
}

impl<T> Detail<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Movie detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub movie: Movie,
    pub scenes: Vec<Scene>,
}

pub struct MovieDetailView<A> {
    api: Arc<A>,
    state: Mutex<Detail<MovieDetail>>,
}

impl<A: CatalogApi> MovieDetailView<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: Mutex::new(Detail::Loading),
        }
    }

    /// Fetch the movie and its scenes concurrently.
    pub async fn load(&self, id: DbId) -> Detail<MovieDetail> {
        *self.state.lock().await = Detail::Loading;

        let (movie, scenes) = futures::join!(
            ResourceApi::<Movie>::get(&*self.api, id),
            self.api.movie_scenes(id)
        );

        let detail = match (movie, scenes) {
            (Ok(movie), Ok(scenes)) => Detail::Loaded(MovieDetail { movie, scenes }),
            (Err(err), _) if err.is_not_found() => Detail::NotFound,
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!(movie_id = id, error = %err, "Failed to load movie detail");
                Detail::Failed(format!("Could not load the movie: {}", client_reason(&err)))
            }
        };

        *self.state.lock().await = detail.clone();
        detail
    }

    pub async fn snapshot(&self) -> Detail<MovieDetail> {
        self.state.lock().await.clone()
    }
}

// ---------------------------------------------------------------------------
// Scene detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SceneDetail {
    pub scene: Scene,
    /// `None` when the scene's movie could not be fetched.
    pub movie: Option<Movie>,
    pub embed_url: Option<String>,
    pub time_range: String,
}

pub struct SceneDetailView<A> {
    api: Arc<A>,
    state: Mutex<Detail<SceneDetail>>,
}

impl<A: CatalogApi> SceneDetailView<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: Mutex::new(Detail::Loading),
        }
    }

    /// Find the scene among the first 1000 scenes, then fetch its movie.
    /// A failed movie fetch still shows the scene.
    pub async fn load(&self, id: DbId) -> Detail<SceneDetail> {
        *self.state.lock().await = Detail::Loading;
        let detail = self.fetch(id).await;
        *self.state.lock().await = detail.clone();
        detail
    }

    pub async fn snapshot(&self) -> Detail<SceneDetail> {
        self.state.lock().await.clone()
    }

    async fn fetch(&self, id: DbId) -> Detail<SceneDetail> {
        let window = PageWindow::first(SCENE_LOOKUP_LIMIT);
        let page = match ResourceApi::<Scene>::list(&*self.api, window).await {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(scene_id = id, error = %err, "Failed to load scenes");
                return Detail::Failed(format!(
                    "Could not load the scene: {}",
                    client_reason(&err)
                ));
            }
        };
        let Some(scene) = page.data.into_iter().find(|s| s.id == id) else {
            return Detail::NotFound;
        };

        let movie = match ResourceApi::<Movie>::get(&*self.api, scene.movie_id).await {
            Ok(movie) => Some(movie),
            Err(err) => {
                tracing::warn!(
                    scene_id = id,
                    movie_id = scene.movie_id,
                    error = %err,
                    "Scene shown without its movie",
                );
                None
            }
        };

        Detail::Loaded(SceneDetail {
            embed_url: scene.embed_url(),
            time_range: scene.time_range(),
            movie,
            scene,
        })
    }
}
