//! Paged, searchable list controller shared by the movies and scenes views.
//!
//! The controller owns a page of one collection together with the search
//! query, the page number, the create and edit drafts, and the last status
//! message. Every operation that changes what is displayed ends in
//! [`ListController::reload`].
//!
//! Reloads may overlap (a user typing a query while the previous page is
//! still loading). Each reload takes the next sequence number and only the
//! response to the most recently issued one is applied; older responses
//! are dropped without touching state.

use std::sync::Arc;

use scenevault_client::{ClientError, ResourceApi, Session};
use scenevault_core::entity::{Draft, Entity};
use scenevault_core::error::CoreError;
use scenevault_core::models::auth::BearerToken;
use scenevault_core::models::movie::Movie;
use scenevault_core::models::scene::Scene;
use scenevault_core::pagination::{
    is_valid_page, total_pages, PageWindow, MOVIES_PAGE_SIZE, SCENES_PAGE_SIZE,
};
use scenevault_core::tags::normalize_tag;
use scenevault_core::types::DbId;
use tokio::sync::Mutex;

use crate::confirm::ConfirmPrompt;
use crate::status::{client_reason, StatusMessage};

/// What happened to the response of one [`ListController::reload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The page was replaced with the response.
    Applied,
    /// A newer reload was issued while this one was in flight.
    Discarded,
    /// The request failed; the previous page is still shown.
    Failed,
}

/// The record currently being edited and its form contents.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft<D> {
    pub id: DbId,
    pub draft: D,
}

/// Everything a list screen renders.
#[derive(Debug, Clone)]
pub struct ListSnapshot<E: Entity> {
    pub query: String,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub items: Vec<E>,
    pub total: u64,
    pub loading: bool,
    pub status: Option<StatusMessage>,
    pub new_draft: E::Draft,
    pub edit: Option<EditDraft<E::Draft>>,
}

#[derive(Debug)]
struct ListState<E: Entity> {
    query: String,
    page: u32,
    items: Vec<E>,
    total: u64,
    loading: bool,
    status: Option<StatusMessage>,
    new_draft: E::Draft,
    edit: Option<EditDraft<E::Draft>>,
    /// Sequence number of the most recently issued reload.
    issued_seq: u64,
}

impl<E: Entity> Default for ListState<E> {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            items: Vec::new(),
            total: 0,
            loading: false,
            status: None,
            new_draft: E::Draft::default(),
            edit: None,
            issued_seq: 0,
        }
    }
}

/// List controller for one catalog collection.
pub struct ListController<E: Entity, A> {
    api: Arc<A>,
    session: Arc<Session>,
    page_size: u32,
    state: Mutex<ListState<E>>,
}

impl<A: ResourceApi<Movie>> ListController<Movie, A> {
    /// Movies list: 12 per page.
    pub fn movies(api: Arc<A>, session: Arc<Session>) -> Self {
        Self::new(api, session, MOVIES_PAGE_SIZE)
    }
}

impl<A: ResourceApi<Scene>> ListController<Scene, A> {
    /// Scenes list: 6 per page.
    pub fn scenes(api: Arc<A>, session: Arc<Session>) -> Self {
        Self::new(api, session, SCENES_PAGE_SIZE)
    }
}

impl<E: Entity, A: ResourceApi<E>> ListController<E, A> {
    pub fn new(api: Arc<A>, session: Arc<Session>, page_size: u32) -> Self {
        Self {
            api,
            session,
            page_size,
            state: Mutex::new(ListState::default()),
        }
    }

    pub async fn snapshot(&self) -> ListSnapshot<E> {
        let state = self.state.lock().await;
        ListSnapshot {
            query: state.query.clone(),
            page: state.page,
            page_size: self.page_size,
            total_pages: total_pages(state.total, self.page_size),
            items: state.items.clone(),
            total: state.total,
            loading: state.loading,
            status: state.status.clone(),
            new_draft: state.new_draft.clone(),
            edit: state.edit.clone(),
        }
    }

    // ---- search & navigation ----

    /// Set the query, go back to page 1 and reload.
    pub async fn search(&self, query: impl Into<String>) -> ReloadOutcome {
        {
            let mut state = self.state.lock().await;
            state.query = query.into();
            state.page = 1;
        }
        self.reload().await
    }

    pub async fn clear_search(&self) -> ReloadOutcome {
        self.search(String::new()).await
    }

    /// Search for a tag clicked on one of the listed records.
    pub async fn select_tag(&self, tag: &str) -> ReloadOutcome {
        self.search(normalize_tag(tag)).await
    }

    /// Jump to `page`. Returns `false` (and does nothing) when the page is
    /// outside `1..=total_pages`.
    pub async fn go_to_page(&self, page: u32) -> bool {
        {
            let mut state = self.state.lock().await;
            if !is_valid_page(page, total_pages(state.total, self.page_size)) {
                return false;
            }
            state.page = page;
        }
        self.reload().await;
        true
    }

    pub async fn next_page(&self) -> bool {
        let page = self.state.lock().await.page;
        self.go_to_page(page.saturating_add(1)).await
    }

    pub async fn previous_page(&self) -> bool {
        let page = self.state.lock().await.page;
        self.go_to_page(page.saturating_sub(1)).await
    }

    /// Fetch the current page for the current query.
    pub async fn reload(&self) -> ReloadOutcome {
        let (seq, query, window) = {
            let mut state = self.state.lock().await;
            state.issued_seq += 1;
            state.loading = true;
            (
                state.issued_seq,
                state.query.clone(),
                PageWindow::for_page(state.page, self.page_size),
            )
        };

        let result = if query.is_empty() {
            self.api.list(window).await
        } else {
            self.api.search(&query, window).await
        };

        let mut state = self.state.lock().await;
        if seq != state.issued_seq {
            tracing::debug!(
                collection = E::COLLECTION,
                seq,
                latest = state.issued_seq,
                "Discarding stale list response",
            );
            return ReloadOutcome::Discarded;
        }
        state.loading = false;

        match result {
            Ok(page) => {
                state.items = page.data;
                state.total = page.total;
                if state.status.as_ref().is_some_and(StatusMessage::is_error) {
                    state.status = None;
                }
                ReloadOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(
                    collection = E::COLLECTION,
                    query = %query,
                    error = %err,
                    "Failed to load list page",
                );
                state.status = Some(StatusMessage::error(format!(
                    "Could not load {}: {}",
                    E::COLLECTION,
                    client_reason(&err)
                )));
                ReloadOutcome::Failed
            }
        }
    }

    // ---- writes ----

    /// Validate and create a record, then reload the current page.
    pub async fn create(&self, draft: &E::Draft) -> Option<E> {
        if let Err(err) = draft.validate() {
            self.set_status(err.into()).await;
            return None;
        }
        let token = self.require_token("add").await?;

        match self.api.create(&token, draft).await {
            Ok(entity) => {
                tracing::info!(collection = E::COLLECTION, id = entity.id(), "Record created");
                self.set_status(StatusMessage::success(format!("{} added successfully", E::NAME)))
                    .await;
                self.reload().await;
                Some(entity)
            }
            Err(err) => {
                self.report_failure("add", &err).await;
                None
            }
        }
    }

    /// Validate and update a record, then reload the current page.
    pub async fn update(&self, id: DbId, draft: &E::Draft) -> Option<E> {
        if let Err(err) = draft.validate() {
            self.set_status(err.into()).await;
            return None;
        }
        let token = self.require_token("edit").await?;

        match self.api.update(&token, id, draft).await {
            Ok(entity) => {
                tracing::info!(collection = E::COLLECTION, id, "Record updated");
                self.set_status(StatusMessage::success(format!("{} updated", E::NAME)))
                    .await;
                self.reload().await;
                Some(entity)
            }
            Err(err) => {
                self.report_failure("update", &err).await;
                None
            }
        }
    }

    /// Delete a record after the user confirms, then reload the current
    /// page. The page number is kept even if the page is now empty.
    pub async fn remove(&self, id: DbId, confirm: impl ConfirmPrompt) -> bool {
        let Some(token) = self.require_token("delete").await else {
            return false;
        };

        let Some(entity) = self.resolve(id).await else {
            return false;
        };
        if !self.can_modify(&entity).await {
            self.set_status(
                CoreError::Forbidden(format!(
                    "You are not allowed to delete this {}",
                    E::NAME.to_lowercase()
                ))
                .into(),
            )
            .await;
            return false;
        }

        let question = format!(
            "Delete {} \"{}\"?",
            E::NAME.to_lowercase(),
            entity.title()
        );
        if !confirm.confirm(&question) {
            return false;
        }

        match self.api.delete(&token, id).await {
            Ok(()) => {
                tracing::info!(collection = E::COLLECTION, id, "Record deleted");
                {
                    let mut state = self.state.lock().await;
                    if state.edit.as_ref().is_some_and(|edit| edit.id == id) {
                        state.edit = None;
                    }
                    state.status = Some(StatusMessage::success(format!("{} deleted", E::NAME)));
                }
                self.reload().await;
                true
            }
            Err(err) => {
                self.report_failure("delete", &err).await;
                false
            }
        }
    }

    // ---- drafts ----

    pub async fn new_draft(&self) -> E::Draft {
        self.state.lock().await.new_draft.clone()
    }

    pub async fn set_new_draft(&self, draft: E::Draft) {
        self.state.lock().await.new_draft = draft;
    }

    /// Submit the create form. On success the form is reset.
    pub async fn submit_new(&self) -> Option<E> {
        let draft = self.new_draft().await;
        let created = self.create(&draft).await?;
        self.state.lock().await.new_draft = draft.after_submit();
        Some(created)
    }

    /// Open the edit form for a record the signed-in user may modify.
    ///
    /// The record is taken from the current page, or fetched when it is not
    /// listed there.
    pub async fn begin_edit(&self, id: DbId) -> bool {
        let Some(user) = self.session.user().await else {
            self.set_status(CoreError::Unauthorized("Sign in to edit".into()).into())
                .await;
            return false;
        };

        let Some(entity) = self.resolve(id).await else {
            return false;
        };
        if !entity.can_modify(&user) {
            self.set_status(
                CoreError::Forbidden(format!(
                    "You are not allowed to edit this {}",
                    E::NAME.to_lowercase()
                ))
                .into(),
            )
            .await;
            return false;
        }

        self.state.lock().await.edit = Some(EditDraft {
            id,
            draft: entity.to_draft(),
        });
        true
    }

    /// Replace the edit form contents. `false` when no edit is open.
    pub async fn set_edit_draft(&self, draft: E::Draft) -> bool {
        match self.state.lock().await.edit.as_mut() {
            Some(edit) => {
                edit.draft = draft;
                true
            }
            None => false,
        }
    }

    pub async fn cancel_edit(&self) {
        self.state.lock().await.edit = None;
    }

    /// Submit the edit form. On success the form is closed.
    pub async fn submit_edit(&self) -> Option<E> {
        let edit = self.state.lock().await.edit.clone()?;
        let updated = self.update(edit.id, &edit.draft).await?;
        let mut state = self.state.lock().await;
        if state.edit.as_ref().is_some_and(|open| open.id == edit.id) {
            state.edit = None;
        }
        Some(updated)
    }

    // ---- helpers ----

    /// Whether the signed-in user may edit or delete `entity`.
    pub async fn can_modify(&self, entity: &E) -> bool {
        self.session
            .user()
            .await
            .is_some_and(|user| entity.can_modify(&user))
    }

    /// The record from the current page, or fetched when it is not listed.
    /// Failures are reported in the status.
    async fn resolve(&self, id: DbId) -> Option<E> {
        if let Some(entity) = self.find(id).await {
            return Some(entity);
        }
        match self.api.get(id).await {
            Ok(entity) => Some(entity),
            Err(err) if err.is_not_found() => {
                self.set_status(CoreError::NotFound { entity: E::NAME, id }.into())
                    .await;
                None
            }
            Err(err) => {
                self.report_failure("load", &err).await;
                None
            }
        }
    }

    async fn find(&self, id: DbId) -> Option<E> {
        self.state
            .lock()
            .await
            .items
            .iter()
            .find(|e| e.id() == id)
            .cloned()
    }

    async fn set_status(&self, status: StatusMessage) {
        self.state.lock().await.status = Some(status);
    }

    async fn require_token(&self, action: &str) -> Option<BearerToken> {
        let token = self.session.token().await;
        if token.is_none() {
            self.set_status(
                CoreError::Unauthorized(format!(
                    "Sign in to {action} a {}",
                    E::NAME.to_lowercase()
                ))
                .into(),
            )
            .await;
        }
        token
    }

    async fn report_failure(&self, action: &str, err: &ClientError) {
        tracing::warn!(collection = E::COLLECTION, action, error = %err, "Write rejected");
        self.set_status(StatusMessage::error(format!(
            "Could not {action} {}: {}",
            E::NAME.to_lowercase(),
            client_reason(err)
        )))
        .await;
    }
}
