use clap::{Args, Parser, Subcommand};
use scenevault_core::models::movie::MovieDraft;
use scenevault_core::models::scene::SceneDraft;
use scenevault_core::tags::TagSet;
use scenevault_core::types::DbId;

#[derive(Parser)]
#[command(name = "scenevault")]
#[command(about = "Browse and curate the SceneVault movie and scene catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// API base URL (overrides SCENEVAULT_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token from a previous `login` (overrides SCENEVAULT_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the latest movies and scenes")]
    Home,

    #[command(about = "Browse and manage movies")]
    Movies {
        #[command(subcommand)]
        command: MovieCommand,
    },

    #[command(about = "Browse and manage scenes")]
    Scenes {
        #[command(subcommand)]
        command: SceneCommand,
    },

    #[command(about = "Sign in and print a token for SCENEVAULT_TOKEN")]
    Login {
        #[arg(long)]
        username: String,

        #[arg(long, env = "SCENEVAULT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    #[command(about = "Create an account and sign in")]
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },

    #[command(about = "Show your profile, or change your e-mail")]
    Profile {
        /// New e-mail address; an empty value clears it
        #[arg(long)]
        email: Option<String>,
    },

    #[command(about = "User administration (admins only)")]
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand)]
pub enum MovieCommand {
    #[command(about = "List movies, optionally filtered")]
    List {
        #[arg(long)]
        query: Option<String>,

        #[arg(long, default_value = "1")]
        page: u32,
    },

    #[command(about = "Show a movie and its scenes")]
    Show { id: DbId },

    #[command(about = "Add a movie")]
    Add {
        #[command(flatten)]
        fields: MovieFields,
    },

    #[command(about = "Edit a movie (admins only)")]
    Edit {
        id: DbId,

        #[command(flatten)]
        fields: MovieFields,
    },

    #[command(about = "Delete a movie (admins only)")]
    Delete {
        id: DbId,

        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SceneCommand {
    #[command(about = "List scenes, optionally filtered by text or tag")]
    List {
        #[arg(long, conflicts_with = "tag")]
        query: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        #[arg(long, default_value = "1")]
        page: u32,
    },

    #[command(about = "Show a scene")]
    Show { id: DbId },

    #[command(about = "Add a scene")]
    Add {
        #[command(flatten)]
        fields: SceneFields,
    },

    #[command(about = "Edit a scene (its creator or an admin)")]
    Edit {
        id: DbId,

        #[command(flatten)]
        fields: SceneFields,
    },

    #[command(about = "Delete a scene (its creator or an admin)")]
    Delete {
        id: DbId,

        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum AdminCommand {
    #[command(about = "List all users")]
    Users,

    #[command(about = "Show one user")]
    User { id: DbId },

    #[command(about = "Delete a regular user")]
    DeleteUser {
        id: DbId,

        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

/// Movie form fields. Only the given flags change the draft.
#[derive(Args, Debug, Default)]
pub struct MovieFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub director: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub poster_url: Option<String>,

    /// Running time in minutes
    #[arg(long)]
    pub duration: Option<i32>,

    /// Comma-separated genres
    #[arg(long)]
    pub genres: Option<String>,

    #[arg(long)]
    pub rating: Option<f64>,
}

impl MovieFields {
    pub fn apply(self, draft: &mut MovieDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        set(&mut draft.year, self.year);
        set_text(&mut draft.director, self.director);
        set_text(&mut draft.description, self.description);
        set_text(&mut draft.poster_url, self.poster_url);
        set(&mut draft.duration, self.duration);
        set_text(&mut draft.genres, self.genres);
        set(&mut draft.imdb_rating, self.rating);
    }
}

/// Scene form fields. Only the given flags change the draft.
#[derive(Args, Debug, Default)]
pub struct SceneFields {
    /// Id of the movie the scene belongs to
    #[arg(long)]
    pub movie: Option<DbId>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Start timestamp, e.g. 01:20:00
    #[arg(long)]
    pub start: Option<String>,

    /// End timestamp, e.g. 01:25:00
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub video_url: Option<String>,

    #[arg(long)]
    pub image_url: Option<String>,

    /// Comma-separated tags; replaces the existing ones
    #[arg(long)]
    pub tags: Option<String>,
}

impl SceneFields {
    pub fn apply(self, draft: &mut SceneDraft) {
        if self.movie.is_some() {
            draft.movie_id = self.movie;
        }
        if let Some(title) = self.title {
            draft.title = title;
        }
        set_text(&mut draft.description, self.description);
        set_text(&mut draft.start_timestamp, self.start);
        set_text(&mut draft.end_timestamp, self.end);
        set_text(&mut draft.video_url, self.video_url);
        set_text(&mut draft.image_url, self.image_url);
        if let Some(tags) = self.tags {
            draft.tags = TagSet::parse(&tags);
        }
    }
}

fn set<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// An explicitly empty text flag clears the field.
fn set_text(slot: &mut Option<String>, value: Option<String>) {
    if let Some(text) = value {
        let text = text.trim();
        *slot = (!text.is_empty()).then(|| text.to_string());
    }
}
