//! API boundary traits.
//!
//! View controllers are generic over these traits so they can run against
//! the HTTP client in production and an in-memory fake in tests.

use std::future::Future;

use scenevault_core::entity::Entity;
use scenevault_core::models::auth::{
    BearerToken, LoginRequest, RegisterRequest, RegisterResponse, TokenResponse,
};
use scenevault_core::models::movie::Movie;
use scenevault_core::models::page::ListPage;
use scenevault_core::models::scene::Scene;
use scenevault_core::models::user::{UpdateProfile, User};
use scenevault_core::pagination::PageWindow;
use scenevault_core::types::DbId;

use crate::error::ClientError;

/// CRUD and search over one catalog collection (`/movies` or `/scenes`).
pub trait ResourceApi<E: Entity>: Send + Sync {
    /// `GET /{collection}?skip=&limit=`
    fn list(
        &self,
        window: PageWindow,
    ) -> impl Future<Output = Result<ListPage<E>, ClientError>> + Send;

    /// `GET /{collection}/search?q=&skip=&limit=`
    fn search(
        &self,
        query: &str,
        window: PageWindow,
    ) -> impl Future<Output = Result<ListPage<E>, ClientError>> + Send;

    /// `GET /{collection}/{id}`
    fn get(&self, id: DbId) -> impl Future<Output = Result<E, ClientError>> + Send;

    /// `POST /{collection}`
    fn create(
        &self,
        token: &BearerToken,
        draft: &E::Draft,
    ) -> impl Future<Output = Result<E, ClientError>> + Send;

    /// `PUT /{collection}/{id}`
    fn update(
        &self,
        token: &BearerToken,
        id: DbId,
        draft: &E::Draft,
    ) -> impl Future<Output = Result<E, ClientError>> + Send;

    /// `DELETE /{collection}/{id}`
    fn delete(
        &self,
        token: &BearerToken,
        id: DbId,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// Both catalog collections plus the movie/scene relation.
pub trait CatalogApi: ResourceApi<Movie> + ResourceApi<Scene> {
    /// `GET /movies/{id}/scenes`
    fn movie_scenes(
        &self,
        movie_id: DbId,
    ) -> impl Future<Output = Result<Vec<Scene>, ClientError>> + Send;
}

/// Session, profile and user administration endpoints.
pub trait AccountApi: Send + Sync {
    /// `POST /auth/token` (form encoded).
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<TokenResponse, ClientError>> + Send;

    /// `POST /auth/register`
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<RegisterResponse, ClientError>> + Send;

    /// `GET /users/me`
    fn current_user(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<User, ClientError>> + Send;

    /// `PUT /users/me`
    fn update_profile(
        &self,
        token: &BearerToken,
        update: &UpdateProfile,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// `GET /users` (admin only).
    fn list_users(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<Vec<User>, ClientError>> + Send;

    /// `GET /users/{id}` (admin only).
    fn get_user(
        &self,
        token: &BearerToken,
        id: DbId,
    ) -> impl Future<Output = Result<User, ClientError>> + Send;

    /// `DELETE /users/{id}` (admin only).
    fn delete_user(
        &self,
        token: &BearerToken,
        id: DbId,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}
