//! Home screen: previews of the latest movies and scenes.

use std::sync::Arc;

use scenevault_client::{CatalogApi, ResourceApi};
use scenevault_core::models::movie::Movie;
use scenevault_core::models::scene::Scene;
use scenevault_core::pagination::{PageWindow, HOME_PREVIEW_LIMIT};
use tokio::sync::Mutex;

use crate::status::client_reason;

/// Characters of a scene description shown in a preview card.
const EXCERPT_CHARS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeSnapshot {
    pub movies: Vec<Movie>,
    pub scenes: Vec<Scene>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct HomeView<A> {
    api: Arc<A>,
    state: Mutex<HomeSnapshot>,
}

impl<A: CatalogApi> HomeView<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: Mutex::new(HomeSnapshot::default()),
        }
    }

    /// Fetch both previews concurrently. If either request fails, both
    /// previews are left empty.
    pub async fn load(&self) -> bool {
        self.state.lock().await.loading = true;

        let window = PageWindow::first(HOME_PREVIEW_LIMIT);
        let (movies, scenes) = futures::join!(
            ResourceApi::<Movie>::list(&*self.api, window),
            ResourceApi::<Scene>::list(&*self.api, window)
        );

        let mut state = self.state.lock().await;
        state.loading = false;
        match (movies, scenes) {
            (Ok(movies), Ok(scenes)) => {
                state.movies = movies.data;
                state.scenes = scenes.data;
                state.error = None;
                true
            }
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!(error = %err, "Failed to load home previews");
                state.movies.clear();
                state.scenes.clear();
                state.error = Some(format!("Could not load the catalog: {}", client_reason(&err)));
                false
            }
        }
    }

    pub async fn snapshot(&self) -> HomeSnapshot {
        self.state.lock().await.clone()
    }
}

/// Preview text for a scene card: the first 50 characters of the
/// description followed by `...`, or nothing when there is no description.
pub fn excerpt(description: Option<&str>) -> String {
    match description {
        Some(text) if !text.is_empty() => {
            let head: String = text.chars().take(EXCERPT_CHARS).collect();
            format!("{head}...")
        }
        _ => String::new(),
    }
}
