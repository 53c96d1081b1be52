//! HTTP implementation of the API boundary.
//!
//! Wraps the SceneVault REST endpoints (catalog CRUD and search, session,
//! profile, user administration) using [`reqwest`].

use reqwest::header::AUTHORIZATION;
use scenevault_core::entity::Entity;
use scenevault_core::models::auth::{
    BearerToken, LoginRequest, RegisterRequest, RegisterResponse, TokenResponse,
};
use scenevault_core::models::page::ListPage;
use scenevault_core::models::scene::Scene;
use scenevault_core::models::user::{UpdateProfile, User};
use scenevault_core::pagination::PageWindow;
use scenevault_core::types::DbId;
use serde::de::DeserializeOwned;

use crate::api::{AccountApi, CatalogApi, ResourceApi};
use crate::config::ClientConfig;
use crate::error::ClientError;

/// HTTP client for one SceneVault API deployment.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    api_url: String,
}

impl CatalogClient {
    /// Create a client for the API at `api_url`, e.g. `http://localhost:8000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Build a client with the configured base URL and request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Base HTTP URL of the API.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn fetch_page<E: Entity>(
        &self,
        path: String,
        query: Option<&str>,
        window: PageWindow,
    ) -> Result<ListPage<E>, ClientError> {
        tracing::debug!(
            path = %path,
            query,
            skip = window.skip,
            limit = window.limit,
            "Fetching list page",
        );

        let mut request = self.client.get(self.url(&path));
        if let Some(q) = query {
            request = request.query(&[("q", q)]);
        }
        let response = request
            .query(&[("skip", window.skip), ("limit", u64::from(window.limit))])
            .send()
            .await?;

        parse_response(response).await
    }
}

impl<E: Entity> ResourceApi<E> for CatalogClient {
    async fn list(&self, window: PageWindow) -> Result<ListPage<E>, ClientError> {
        self.fetch_page(format!("/{}", E::COLLECTION), None, window)
            .await
    }

    async fn search(&self, query: &str, window: PageWindow) -> Result<ListPage<E>, ClientError> {
        self.fetch_page(format!("/{}/search", E::COLLECTION), Some(query), window)
            .await
    }

    async fn get(&self, id: DbId) -> Result<E, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/{}/{id}", E::COLLECTION)))
            .send()
            .await?;

        parse_response(response).await
    }

    async fn create(&self, token: &BearerToken, draft: &E::Draft) -> Result<E, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/{}", E::COLLECTION)))
            .header(AUTHORIZATION, token.header_value())
            .json(draft)
            .send()
            .await?;

        parse_response(response).await
    }

    async fn update(
        &self,
        token: &BearerToken,
        id: DbId,
        draft: &E::Draft,
    ) -> Result<E, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/{}/{id}", E::COLLECTION)))
            .header(AUTHORIZATION, token.header_value())
            .json(draft)
            .send()
            .await?;

        parse_response(response).await
    }

    async fn delete(&self, token: &BearerToken, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/{}/{id}", E::COLLECTION)))
            .header(AUTHORIZATION, token.header_value())
            .send()
            .await?;

        check_status(response).await
    }
}

impl CatalogApi for CatalogClient {
    async fn movie_scenes(&self, movie_id: DbId) -> Result<Vec<Scene>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/movies/{movie_id}/scenes")))
            .send()
            .await?;

        let page: ListPage<Scene> = parse_response(response).await?;
        Ok(page.data)
    }
}

impl AccountApi for CatalogClient {
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/auth/token"))
            .form(request)
            .send()
            .await?;

        parse_response(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(request)
            .send()
            .await?;

        parse_response(response).await
    }

    async fn current_user(&self, token: &BearerToken) -> Result<User, ClientError> {
        let response = self
            .client
            .get(self.url("/users/me"))
            .header(AUTHORIZATION, token.header_value())
            .send()
            .await?;

        parse_response(response).await
    }

    async fn update_profile(
        &self,
        token: &BearerToken,
        update: &UpdateProfile,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .put(self.url("/users/me"))
            .header(AUTHORIZATION, token.header_value())
            .json(update)
            .send()
            .await?;

        check_status(response).await
    }

    async fn list_users(&self, token: &BearerToken) -> Result<Vec<User>, ClientError> {
        let response = self
            .client
            .get(self.url("/users"))
            .header(AUTHORIZATION, token.header_value())
            .send()
            .await?;

        parse_response(response).await
    }

    async fn get_user(&self, token: &BearerToken, id: DbId) -> Result<User, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/users/{id}")))
            .header(AUTHORIZATION, token.header_value())
            .send()
            .await?;

        parse_response(response).await
    }

    async fn delete_user(&self, token: &BearerToken, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/users/{id}")))
            .header(AUTHORIZATION, token.header_value())
            .send()
            .await?;

        check_status(response).await
    }
}

// ---- private helpers ----

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or a [`ClientError::Status`] carrying the API's
/// `detail` message on failure.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body);
        tracing::warn!(
            status = status.as_u16(),
            detail = detail.as_deref().unwrap_or(""),
            "API request rejected",
        );
        return Err(ClientError::Status {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let response = ensure_success(response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Assert the response has a success status code, discarding the body.
async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
    ensure_success(response).await?;
    Ok(())
}

/// Pull the `detail` field out of an error body.
///
/// The API sends `{"detail": "..."}` for domain errors and
/// `{"detail": [...]}` for request validation errors.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
