//! View controllers for the SceneVault catalog.
//!
//! Each controller owns the state one screen renders (lists, previews,
//! detail pages, account forms) and talks to the API only through the
//! traits in [`scenevault_client::api`]. The signed-in user is shared
//! through an explicit [`scenevault_client::Session`].

pub mod admin;
pub mod auth;
pub mod confirm;
pub mod detail;
pub mod home;
pub mod list;
pub mod profile;
pub mod scenes;
pub mod status;

pub use admin::{AdminDashboard, AdminSnapshot};
pub use auth::AuthService;
pub use confirm::{AssumeYes, ConfirmPrompt};
pub use detail::{Detail, MovieDetail, MovieDetailView, SceneDetail, SceneDetailView};
pub use home::{HomeSnapshot, HomeView};
pub use list::{EditDraft, ListController, ListSnapshot, ReloadOutcome};
pub use profile::ProfileView;
pub use scenes::ScenesView;
pub use status::{StatusKind, StatusMessage};
