//! SceneVault domain types and pure helpers.
//!
//! This crate has no I/O. It holds the catalog entities as they travel over
//! the wire, the draft forms used to create and edit them, and the small
//! stateless rules (pagination math, tag parsing, YouTube embed links,
//! permission checks) that the client and the view controllers share.

pub mod entity;
pub mod error;
pub mod models;
pub mod pagination;
pub mod permissions;
pub mod tags;
pub mod types;
pub mod validation;
pub mod video;
