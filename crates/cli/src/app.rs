//! Command handlers. Each one drives a view controller and prints what it
//! would render.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context};
use scenevault_client::{CatalogClient, ClientConfig, ResourceApi, Session};
use scenevault_core::entity::Entity;
use scenevault_core::models::auth::RegistrationForm;
use scenevault_core::types::DbId;
use scenevault_views::{
    AdminDashboard, AuthService, Detail, HomeView, ListController, ListSnapshot, MovieDetailView,
    ProfileView, ReloadOutcome, SceneDetailView, ScenesView, StatusMessage,
};

use crate::args::{AdminCommand, Commands, MovieCommand, SceneCommand};
use crate::render;

pub struct App {
    api: Arc<CatalogClient>,
    session: Arc<Session>,
}

impl App {
    /// Build the HTTP client and restore the configured session, if any.
    ///
    /// A stale token only produces a warning; the command runs signed out.
    pub async fn connect(config: &ClientConfig) -> anyhow::Result<Self> {
        let api = Arc::new(
            CatalogClient::from_config(config).context("Failed to build the HTTP client")?,
        );
        let session = Arc::new(Session::anonymous());

        if let Some(token) = &config.token {
            let auth = AuthService::new(api.clone(), session.clone());
            match auth.restore(token).await {
                Ok(user) => tracing::debug!(username = %user.username, "Session restored"),
                Err(status) => tracing::warn!("{status}"),
            }
        }

        tracing::debug!(api_url = api.api_url(), "Connected");
        Ok(Self { api, session })
    }

    pub async fn run(&self, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Home => self.home().await,
            Commands::Movies { command } => self.movies(command).await,
            Commands::Scenes { command } => self.scenes(command).await,
            Commands::Login { username, password } => self.login(&username, &password).await,
            Commands::Register {
                username,
                email,
                password,
                confirm_password,
            } => {
                let form = RegistrationForm {
                    username,
                    email: email.unwrap_or_default(),
                    password,
                    confirm_password,
                };
                self.register(&form).await
            }
            Commands::Profile { email } => self.profile(email.as_deref()).await,
            Commands::Admin { command } => self.admin(command).await,
        }
    }

    async fn home(&self) -> anyhow::Result<()> {
        let view = HomeView::new(self.api.clone());
        view.load().await;
        let snapshot = view.snapshot().await;
        if let Some(error) = snapshot.error {
            bail!(error);
        }
        print!("{}", render::home(&snapshot));
        Ok(())
    }

    // ---- movies ----

    async fn movies(&self, command: MovieCommand) -> anyhow::Result<()> {
        let list = ListController::movies(self.api.clone(), self.session.clone());
        match command {
            MovieCommand::List { query, page } => {
                open_first_page(&list, query.as_deref()).await;
                let snapshot = turn_to(&list, page).await?;
                let lines: Vec<String> = snapshot.items.iter().map(render::movie_line).collect();
                print!("{}", render::list_page(&snapshot, &lines));
                Ok(())
            }
            MovieCommand::Show { id } => {
                let view = MovieDetailView::new(self.api.clone());
                let detail = expect_loaded(view.load(id).await, "Movie", id)?;
                print!("{}", render::movie_detail(&detail));
                Ok(())
            }
            MovieCommand::Add { fields } => {
                let mut draft = list.new_draft().await;
                fields.apply(&mut draft);
                list.set_new_draft(draft).await;
                let created = list.submit_new().await;
                report(list.snapshot().await.status)?;
                if let Some(movie) = created {
                    println!("{}", render::movie_line(&movie));
                }
                Ok(())
            }
            MovieCommand::Edit { id, fields } => {
                let Some(mut draft) = open_edit(&list, id).await? else {
                    return Ok(());
                };
                fields.apply(&mut draft);
                list.set_edit_draft(draft).await;
                list.submit_edit().await;
                report(list.snapshot().await.status)
            }
            MovieCommand::Delete { id, yes } => {
                list.remove(id, move |question: &str| yes || confirm_on_stdin(question))
                    .await;
                report(list.snapshot().await.status)
            }
        }
    }

    // ---- scenes ----

    async fn scenes(&self, command: SceneCommand) -> anyhow::Result<()> {
        let view = ScenesView::new(self.api.clone(), self.session.clone());
        let list = view.list();
        match command {
            SceneCommand::List { query, tag, page } => {
                let first = async {
                    match tag.as_deref() {
                        Some(tag) => list.select_tag(tag).await,
                        None => open_first_page(list, query.as_deref()).await,
                    }
                };
                futures::join!(first, view.refresh_movies());
                let snapshot = turn_to(list, page).await?;

                let mut lines = Vec::with_capacity(snapshot.items.len());
                for scene in &snapshot.items {
                    let movie_title = view.movie_title(scene.movie_id).await;
                    lines.push(render::scene_line(scene, &movie_title));
                }
                print!("{}", render::list_page(&snapshot, &lines));
                Ok(())
            }
            SceneCommand::Show { id } => {
                let detail_view = SceneDetailView::new(self.api.clone());
                let detail = expect_loaded(detail_view.load(id).await, "Scene", id)?;
                print!("{}", render::scene_detail(&detail));
                Ok(())
            }
            SceneCommand::Add { fields } => {
                if let Some(movie_id) = fields.movie {
                    view.select_movie(movie_id).await;
                }
                let mut draft = list.new_draft().await;
                fields.apply(&mut draft);
                list.set_new_draft(draft).await;
                let created = list.submit_new().await;
                report(list.snapshot().await.status)?;
                if let Some(scene) = created {
                    let movie_title = if view.refresh_movies().await {
                        view.movie_title(scene.movie_id).await
                    } else {
                        format!("#{}", scene.movie_id)
                    };
                    println!("{}", render::scene_line(&scene, &movie_title));
                }
                Ok(())
            }
            SceneCommand::Edit { id, fields } => {
                let Some(mut draft) = open_edit(list, id).await? else {
                    return Ok(());
                };
                fields.apply(&mut draft);
                list.set_edit_draft(draft).await;
                list.submit_edit().await;
                report(list.snapshot().await.status)
            }
            SceneCommand::Delete { id, yes } => {
                list.remove(id, move |question: &str| yes || confirm_on_stdin(question))
                    .await;
                report(list.snapshot().await.status)
            }
        }
    }

    // ---- account ----

    async fn login(&self, username: &str, password: &str) -> anyhow::Result<()> {
        let auth = AuthService::new(self.api.clone(), self.session.clone());
        let user = auth.login(username, password).await.map_err(status_error)?;
        eprintln!("Signed in as {} ({})", user.username, user.role_label());
        self.print_token().await
    }

    async fn register(&self, form: &RegistrationForm) -> anyhow::Result<()> {
        let auth = AuthService::new(self.api.clone(), self.session.clone());
        let user = auth.register(form).await.map_err(status_error)?;
        eprintln!("Registered and signed in as {}", user.username);
        self.print_token().await
    }

    /// The token goes to stdout alone so it can be captured into
    /// `SCENEVAULT_TOKEN`.
    async fn print_token(&self) -> anyhow::Result<()> {
        let token = self
            .session
            .token()
            .await
            .context("Signed in without a token")?;
        println!("{}", token.as_str());
        Ok(())
    }

    async fn profile(&self, email: Option<&str>) -> anyhow::Result<()> {
        let view = ProfileView::new(self.api.clone(), self.session.clone());
        if let Some(email) = email {
            view.update_email(email).await;
            report(view.status().await)?;
        }
        let user = view
            .user()
            .await
            .context("Sign in to see your profile")?;
        print!("{}", render::profile(&user));
        Ok(())
    }

    async fn admin(&self, command: AdminCommand) -> anyhow::Result<()> {
        let dashboard = AdminDashboard::new(self.api.clone(), self.session.clone());
        match command {
            AdminCommand::Users => {
                dashboard.load_users().await;
                let snapshot = dashboard.snapshot().await;
                report(snapshot.status)?;
                for user in &snapshot.users {
                    println!("{}", render::user_line(user));
                }
                Ok(())
            }
            AdminCommand::User { id } => match dashboard.user(id).await {
                Some(user) => {
                    println!("{}", render::user_line(&user));
                    Ok(())
                }
                None => report(dashboard.snapshot().await.status),
            },
            AdminCommand::DeleteUser { id, yes } => {
                dashboard.load_users().await;
                report_errors(dashboard.snapshot().await.status)?;
                dashboard
                    .delete_user(id, move |question: &str| yes || confirm_on_stdin(question))
                    .await;
                report(dashboard.snapshot().await.status)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn open_first_page<E: Entity, A: ResourceApi<E>>(
    list: &ListController<E, A>,
    query: Option<&str>,
) -> ReloadOutcome {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => list.search(query).await,
        None => list.reload().await,
    }
}

/// Move from page 1 to `page` and return what the list now shows.
async fn turn_to<E: Entity, A: ResourceApi<E>>(
    list: &ListController<E, A>,
    page: u32,
) -> anyhow::Result<ListSnapshot<E>> {
    report_errors(list.snapshot().await.status)?;
    if page != 1 {
        if !list.go_to_page(page).await {
            let total_pages = list.snapshot().await.total_pages;
            bail!("Page {page} does not exist ({total_pages} pages)");
        }
        report_errors(list.snapshot().await.status)?;
    }
    Ok(list.snapshot().await)
}

/// Open the edit form for `id` and return its draft.
async fn open_edit<E: Entity, A: ResourceApi<E>>(
    list: &ListController<E, A>,
    id: DbId,
) -> anyhow::Result<Option<E::Draft>> {
    if !list.begin_edit(id).await {
        report(list.snapshot().await.status)?;
        return Ok(None);
    }
    Ok(list.snapshot().await.edit.map(|edit| edit.draft))
}

fn expect_loaded<T>(detail: Detail<T>, name: &str, id: DbId) -> anyhow::Result<T> {
    match detail {
        Detail::Loaded(value) => Ok(value),
        Detail::NotFound => bail!("{name} #{id} not found"),
        Detail::Failed(reason) => bail!("Could not load {}: {reason}", name.to_lowercase()),
        Detail::Loading => bail!("{name} #{id} is still loading"),
    }
}

/// Print a success message, or turn an error message into a failure.
fn report(status: Option<StatusMessage>) -> anyhow::Result<()> {
    match status {
        Some(status) if status.is_error() => Err(status_error(status)),
        Some(status) => {
            println!("{status}");
            Ok(())
        }
        None => Ok(()),
    }
}

fn report_errors(status: Option<StatusMessage>) -> anyhow::Result<()> {
    match status {
        Some(status) if status.is_error() => Err(status_error(status)),
        _ => Ok(()),
    }
}

fn status_error(status: StatusMessage) -> anyhow::Error {
    anyhow::anyhow!(status.text)
}

fn confirm_on_stdin(question: &str) -> bool {
    eprint!("{question} [y/N] ");
    if io::stderr().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
