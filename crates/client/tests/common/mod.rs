//! In-process fake of the SceneVault REST API.
//!
//! Serves the same routes as the real backend from an in-memory store,
//! bound to `127.0.0.1:0`, and records every request it receives so tests
//! can assert on paths, query strings and credentials.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;

use scenevault_core::models::movie::{Movie, MovieDraft};
use scenevault_core::models::scene::{Scene, SceneDraft};
use scenevault_core::models::user::{UpdateProfile, User};
use scenevault_core::tags::TagSet;
use scenevault_core::types::DbId;

pub type Shared = Arc<Mutex<Store>>;

/// One request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub movies: Vec<Movie>,
    pub scenes: Vec<Scene>,
    pub users: Vec<(User, String)>,
    pub next_id: DbId,
    pub requests: Vec<RecordedRequest>,
    /// When set, list endpoints answer 200 with an unparseable body.
    pub malformed_lists: bool,
}

impl Store {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_user(&mut self, username: &str, password: &str, is_admin: bool) -> User {
        let user = User {
            id: self.next_id(),
            username: username.to_string(),
            email: None,
            is_admin,
        };
        self.users.push((user.clone(), password.to_string()));
        user
    }

    pub fn add_movie(&mut self, title: &str) -> Movie {
        let movie = Movie {
            id: self.next_id(),
            title: title.to_string(),
            year: Some(2000),
            director: None,
            description: None,
            poster_url: None,
            duration: None,
            genres: None,
            imdb_rating: None,
        };
        self.movies.push(movie.clone());
        movie
    }

    pub fn add_scene(&mut self, movie_id: DbId, title: &str, tags: &str, created_by: DbId) -> Scene {
        let scene = Scene {
            id: self.next_id(),
            movie_id,
            title: title.to_string(),
            description: None,
            start_timestamp: None,
            end_timestamp: None,
            video_url: None,
            image_url: None,
            tags: TagSet::parse(tags),
            created_by: Some(created_by),
        };
        self.scenes.push(scene.clone());
        scene
    }
}

/// Token format understood by the fake backend.
pub fn token_for(user: &User) -> String {
    format!("token-{}", user.id)
}

pub struct TestBackend {
    pub url: String,
    pub state: Shared,
}

impl TestBackend {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().last().cloned().expect("no request recorded")
    }

    pub fn with_store<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }
}

/// Start the fake backend on an ephemeral port.
pub async fn spawn_backend(store: Store) -> TestBackend {
    let state: Shared = Arc::new(Mutex::new(store));

    let app = Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/search", get(search_movies))
        .route(
            "/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .route("/movies/{id}/scenes", get(movie_scenes))
        .route("/scenes", get(list_scenes).post(create_scene))
        .route("/scenes/search", get(search_scenes))
        .route(
            "/scenes/{id}",
            get(get_scene).put(update_scene).delete(delete_scene),
        )
        .route("/auth/token", axum::routing::post(login))
        .route("/auth/register", axum::routing::post(register))
        .route("/users/me", get(me).put(update_me))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    TestBackend {
        url: format!("http://{addr}"),
        state,
    }
}

// ---------------------------------------------------------------------------
// Middleware & helpers
// ---------------------------------------------------------------------------

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let query = request
        .uri()
        .query()
        .map(|q| {
            q.split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| (k.to_string(), v.replace('+', " ")))
                .collect()
        })
        .unwrap_or_default();
    let recorded = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query,
        authorization: request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    state.lock().unwrap().requests.push(recorded);
    next.run(request).await
}

fn error(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn malformed() -> Response {
    (StatusCode::OK, "{not json").into_response()
}

fn authenticate(store: &Store, headers: &HeaderMap) -> Option<User> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    store
        .users
        .iter()
        .map(|(u, _)| u)
        .find(|u| token_for(u) == token)
        .cloned()
}

#[derive(Debug, Deserialize)]
struct ListParams {
    q: Option<String>,
    skip: Option<usize>,
    limit: Option<usize>,
}

fn paged<T: serde::Serialize + Clone>(items: Vec<T>, params: &ListParams) -> Response {
    let total = items.len();
    let data: Vec<T> = items
        .into_iter()
        .skip(params.skip.unwrap_or(0))
        .take(params.limit.unwrap_or(20))
        .collect();
    Json(json!({ "data": data, "total": total })).into_response()
}

fn contains(field: &Option<String>, q: &str) -> bool {
    field.as_deref().is_some_and(|f| f.contains(q))
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

async fn list_movies(State(state): State<Shared>, Query(params): Query<ListParams>) -> Response {
    let store = state.lock().unwrap();
    if store.malformed_lists {
        return malformed();
    }
    paged(store.movies.clone(), &params)
}

async fn search_movies(State(state): State<Shared>, Query(params): Query<ListParams>) -> Response {
    let store = state.lock().unwrap();
    let q = params.q.clone().unwrap_or_default();
    let hits: Vec<Movie> = store
        .movies
        .iter()
        .filter(|m| {
            m.title.contains(&q)
                || contains(&m.description, &q)
                || contains(&m.director, &q)
                || contains(&m.genres, &q)
        })
        .cloned()
        .collect();
    paged(hits, &params)
}

async fn get_movie(State(state): State<Shared>, Path(id): Path<DbId>) -> Response {
    let store = state.lock().unwrap();
    match store.movies.iter().find(|m| m.id == id) {
        Some(movie) => Json(movie.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Movie not found"),
    }
}

async fn create_movie(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(draft): Json<MovieDraft>,
) -> Response {
    let mut store = state.lock().unwrap();
    if authenticate(&store, &headers).is_none() {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    let movie = Movie {
        id: store.next_id(),
        title: draft.title,
        year: draft.year,
        director: draft.director,
        description: draft.description,
        poster_url: draft.poster_url,
        duration: draft.duration,
        genres: draft.genres,
        imdb_rating: draft.imdb_rating,
    };
    store.movies.push(movie.clone());
    Json(movie).into_response()
}

async fn update_movie(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<DbId>,
    Json(draft): Json<MovieDraft>,
) -> Response {
    let mut store = state.lock().unwrap();
    match authenticate(&store, &headers) {
        Some(user) if user.is_admin => {}
        Some(_) => return error(StatusCode::FORBIDDEN, "Admin privileges required"),
        None => return error(StatusCode::UNAUTHORIZED, "Not authenticated"),
    }
    let Some(movie) = store.movies.iter_mut().find(|m| m.id == id) else {
        return error(StatusCode::NOT_FOUND, "Movie not found");
    };
    movie.title = draft.title;
    movie.year = draft.year;
    movie.director = draft.director;
    movie.description = draft.description;
    movie.poster_url = draft.poster_url;
    Json(movie.clone()).into_response()
}

async fn delete_movie(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<DbId>,
) -> Response {
    let mut store = state.lock().unwrap();
    match authenticate(&store, &headers) {
        Some(user) if user.is_admin => {}
        Some(_) => return error(StatusCode::FORBIDDEN, "Admin privileges required"),
        None => return error(StatusCode::UNAUTHORIZED, "Not authenticated"),
    }
    let before = store.movies.len();
    store.movies.retain(|m| m.id != id);
    if store.movies.len() == before {
        return error(StatusCode::NOT_FOUND, "Movie not found");
    }
    Json(json!({ "ok": true })).into_response()
}

async fn movie_scenes(State(state): State<Shared>, Path(id): Path<DbId>) -> Response {
    let store = state.lock().unwrap();
    let scenes: Vec<Scene> = store
        .scenes
        .iter()
        .filter(|s| s.movie_id == id)
        .cloned()
        .collect();
    Json(scenes).into_response()
}

// ---------------------------------------------------------------------------
// Scenes
// ---------------------------------------------------------------------------

async fn list_scenes(State(state): State<Shared>, Query(params): Query<ListParams>) -> Response {
    let store = state.lock().unwrap();
    if store.malformed_lists {
        return malformed();
    }
    paged(store.scenes.clone(), &params)
}

async fn search_scenes(State(state): State<Shared>, Query(params): Query<ListParams>) -> Response {
    let store = state.lock().unwrap();
    let q = params.q.clone().unwrap_or_default();
    let hits: Vec<Scene> = store
        .scenes
        .iter()
        .filter(|s| {
            s.title.contains(&q)
                || contains(&s.description, &q)
                || s.tags.to_string().contains(&q)
        })
        .cloned()
        .collect();
    paged(hits, &params)
}

async fn get_scene(State(state): State<Shared>, Path(id): Path<DbId>) -> Response {
    let store = state.lock().unwrap();
    match store.scenes.iter().find(|s| s.id == id) {
        Some(scene) => Json(scene.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Scene not found"),
    }
}

async fn create_scene(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(draft): Json<SceneDraft>,
) -> Response {
    let mut store = state.lock().unwrap();
    let Some(user) = authenticate(&store, &headers) else {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let Some(movie_id) = draft.movie_id.filter(|id| store.movies.iter().any(|m| m.id == *id))
    else {
        return error(StatusCode::BAD_REQUEST, "Movie not found");
    };
    let scene = Scene {
        id: store.next_id(),
        movie_id,
        title: draft.title,
        description: draft.description,
        start_timestamp: draft.start_timestamp,
        end_timestamp: draft.end_timestamp,
        video_url: draft.video_url,
        image_url: draft.image_url,
        tags: draft.tags,
        created_by: Some(user.id),
    };
    store.scenes.push(scene.clone());
    Json(scene).into_response()
}

async fn update_scene(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<DbId>,
    Json(draft): Json<SceneDraft>,
) -> Response {
    let mut store = state.lock().unwrap();
    let Some(user) = authenticate(&store, &headers) else {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let Some(scene) = store.scenes.iter_mut().find(|s| s.id == id) else {
        return error(StatusCode::NOT_FOUND, "Scene not found");
    };
    if scene.created_by != Some(user.id) && !user.is_admin {
        return error(StatusCode::FORBIDDEN, "Not allowed");
    }
    scene.title = draft.title;
    scene.description = draft.description;
    scene.start_timestamp = draft.start_timestamp;
    scene.end_timestamp = draft.end_timestamp;
    scene.video_url = draft.video_url;
    scene.image_url = draft.image_url;
    scene.tags = draft.tags;
    Json(scene.clone()).into_response()
}

async fn delete_scene(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<DbId>,
) -> Response {
    let mut store = state.lock().unwrap();
    let Some(user) = authenticate(&store, &headers) else {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let Some(scene) = store.scenes.iter().find(|s| s.id == id) else {
        return error(StatusCode::NOT_FOUND, "Scene not found");
    };
    if scene.created_by != Some(user.id) && !user.is_admin {
        return error(StatusCode::FORBIDDEN, "Not allowed");
    }
    store.scenes.retain(|s| s.id != id);
    Json(json!({ "ok": true })).into_response()
}

// ---------------------------------------------------------------------------
// Auth & users
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(State(state): State<Shared>, Form(form): Form<LoginForm>) -> Response {
    let store = state.lock().unwrap();
    let found = store
        .users
        .iter()
        .find(|(u, p)| u.username == form.username && *p == form.password);
    match found {
        Some((user, _)) => {
            Json(json!({ "access_token": token_for(user), "token_type": "bearer" }))
                .into_response()
        }
        None => error(StatusCode::UNAUTHORIZED, "Incorrect username or password"),
    }
}

#[derive(Debug, Deserialize)]
struct RegisterBody {
    username: String,
    email: Option<String>,
    password: String,
}

async fn register(State(state): State<Shared>, Json(body): Json<RegisterBody>) -> Response {
    let mut store = state.lock().unwrap();
    if store.users.iter().any(|(u, _)| u.username == body.username) {
        return error(StatusCode::BAD_REQUEST, "Username already registered");
    }
    let mut user = store.add_user(&body.username, &body.password, false);
    user.email = body.email;
    if let Some(entry) = store.users.iter_mut().find(|(u, _)| u.id == user.id) {
        entry.0 = user.clone();
    }
    Json(json!({ "username": user.username, "id": user.id })).into_response()
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let store = state.lock().unwrap();
    match authenticate(&store, &headers) {
        Some(user) => Json(user).into_response(),
        None => error(StatusCode::UNAUTHORIZED, "Could not validate credentials"),
    }
}

async fn update_me(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(update): Json<UpdateProfile>,
) -> Response {
    let mut store = state.lock().unwrap();
    let Some(user) = authenticate(&store, &headers) else {
        return error(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    };
    let Some(entry) = store.users.iter_mut().find(|(u, _)| u.id == user.id) else {
        return error(StatusCode::NOT_FOUND, "User not found");
    };
    entry.0.email = update.email;
    Json(entry.0.clone()).into_response()
}

fn require_admin(store: &Store, headers: &HeaderMap) -> Result<User, Response> {
    match authenticate(store, headers) {
        Some(user) if user.is_admin => Ok(user),
        Some(_) => Err(error(StatusCode::FORBIDDEN, "Admin privileges required")),
        None => Err(error(StatusCode::UNAUTHORIZED, "Not authenticated")),
    }
}

async fn list_users(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let store = state.lock().unwrap();
    if let Err(response) = require_admin(&store, &headers) {
        return response;
    }
    let users: Vec<User> = store.users.iter().map(|(u, _)| u.clone()).collect();
    Json(users).into_response()
}

async fn get_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<DbId>,
) -> Response {
    let store = state.lock().unwrap();
    if let Err(response) = require_admin(&store, &headers) {
        return response;
    }
    match store.users.iter().find(|(u, _)| u.id == id) {
        Some((user, _)) => Json(user.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn delete_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<DbId>,
) -> Response {
    let mut store = state.lock().unwrap();
    if let Err(response) = require_admin(&store, &headers) {
        return response;
    }
    let target_is_admin = store
        .users
        .iter()
        .find(|(u, _)| u.id == id)
        .map(|(u, _)| u.is_admin);
    match target_is_admin {
        None => error(StatusCode::NOT_FOUND, "User not found"),
        Some(true) => error(StatusCode::BAD_REQUEST, "Cannot delete an admin user"),
        Some(false) => {
            store.users.retain(|(u, _)| u.id != id);
            Json(json!({ "ok": true })).into_response()
        }
    }
}
