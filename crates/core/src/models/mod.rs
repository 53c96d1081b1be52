//! Wire models for the SceneVault API.
//!
//! Each submodule holds the entity as returned by the API plus the DTOs
//! sent to create or update it.

pub mod auth;
pub mod movie;
pub mod page;
pub mod scene;
pub mod user;
