//! SceneVault REST client.
//!
//! Provides the API boundary traits ([`api::ResourceApi`],
//! [`api::CatalogApi`], [`api::AccountApi`]), their HTTP implementation on
//! top of [`reqwest`] ([`http::CatalogClient`]), the explicit [`session::Session`]
//! handed to every view controller, and environment-based configuration.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use api::{AccountApi, CatalogApi, ResourceApi};
pub use config::ClientConfig;
pub use error::ClientError;
pub use http::CatalogClient;
pub use session::{Session, SignedIn};
