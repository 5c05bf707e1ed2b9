//! src/controller/event_loop.rs
//! ============================================================================
//! # Controller: Async Event Loop
//!
//! Owns the [`AppState`] and drives every transition from a single tokio
//! task: commands arrive on an mpsc channel, the debounce gate contributes a
//! timer branch, and after each handled event a fresh [`RenderSnapshot`] is
//! published. All network awaits happen inline on this task, so state is
//! never mutated concurrently.
//!
//! Responses are applied through token-guarded `apply_*` methods: a response
//! that no longer matches the latest token *and* the current
//! mode/query/selection is silently discarded (cancellation by relevance
//! check rather than true cancellation).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::client::KnowledgeBaseApi;
use crate::api::types::{SearchPage, TextEntry};
use crate::config::config::Config;
use crate::controller::commands::Command;
use crate::controller::coordinator::{self, Mutation, RefreshPlan};
use crate::controller::router;
use crate::error::AppError;
use crate::model::app_state::{AppState, RegionState};
use crate::model::result_set::QueryMode;
use crate::util::debounce::DebounceGate;
use crate::view::snapshots::RenderSnapshot;

/// Handles returned by [`Controller::new`] for the surrounding runtime.
pub struct ConsoleHandles {
    pub commands: mpsc::UnboundedSender<Command>,
    pub snapshots: mpsc::UnboundedReceiver<RenderSnapshot>,
}

/// Command-driven controller, generic over the API seam.
pub struct Controller<A> {
    api: A,
    pub state: AppState,
    cmd_rx: mpsc::UnboundedReceiver<Command>,
    snapshot_tx: mpsc::UnboundedSender<RenderSnapshot>,
    debounce: DebounceGate,
}

impl<A: KnowledgeBaseApi> Controller<A> {
    pub fn new(api: A, config: Arc<Config>) -> (Self, ConsoleHandles) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();
        let debounce = DebounceGate::new(config.debounce);
        let controller = Self {
            api,
            state: AppState::new(config),
            cmd_rx,
            snapshot_tx,
            debounce,
        };
        (
            controller,
            ConsoleHandles {
                commands: cmd_tx,
                snapshots: snapshot_rx,
            },
        )
    }

    /// Initial hierarchy load, then Home.
    pub async fn bootstrap(&mut self) {
        info!("bootstrapping console");
        self.reload_hierarchy().await;
    }

    /// Main loop: commands and the debounce deadline, one at a time.
    pub async fn run(mut self) -> Result<(), AppError> {
        self.publish();
        loop {
            let deadline = self.debounce.deadline();
            tokio::select! {
                maybe_cmd = self.cmd_rx.recv() => {
                    match maybe_cmd {
                        None | Some(Command::Quit) => break,
                        Some(cmd) => self.dispatch(cmd).await,
                    }
                }
                _ = tokio::time::sleep_until(
                    deadline.unwrap_or_else(|| tokio::time::Instant::now()
                        + Duration::from_secs(86_400))
                ), if deadline.is_some() => {
                    self.flush_search().await;
                }
            }
            self.publish();
        }
        info!("event loop ended");
        Ok(())
    }

    /// Apply one command to the state machine.
    pub async fn dispatch(&mut self, cmd: Command) {
        debug!("dispatch: {cmd:?}");
        match cmd {
            Command::SelectFile { file_id, file_name } => {
                self.debounce.cancel();
                self.state.select_file(file_id, file_name);
                self.load_file_texts(file_id).await;
            }
            Command::GoHome => {
                self.debounce.cancel();
                self.state.go_home();
            }
            Command::SearchInput(text) => {
                self.state.query = text.clone();
                self.debounce.arm(text);
            }
            Command::ChangePage(page) => self.refresh_view(page).await,
            Command::SetPageSize(size) => {
                self.state.page_size = size.max(1);
                self.refresh_view(1).await;
            }
            Command::FilterSidebar(text) => {
                self.state.sidebar_filter = text;
                self.state.redraw = true;
            }
            Command::ReloadHierarchy => self.reload_hierarchy().await,
            Command::Mutate(mutation) => {
                self.apply_mutation(mutation).await;
            }
            Command::RequestDelete(target) => {
                self.state.pending_delete =
                    Some(coordinator::pending_delete_for(&target, &self.state.hierarchy));
                self.state.redraw = true;
            }
            Command::ConfirmDelete => {
                if let Some(pending) = self.state.pending_delete.clone() {
                    // the confirmation stays armed if the request fails
                    if self.apply_mutation(pending.mutation).await {
                        self.state.pending_delete = None;
                    }
                }
            }
            Command::CancelDelete => {
                self.state.pending_delete = None;
                self.state.redraw = true;
            }
            Command::DismissNotification => self.state.dismiss_notification(),
            Command::Quit => {}
        }
    }

    /// Debounce deadline elapsed: issue exactly one retrieval for the last
    /// input of the burst.
    pub async fn flush_search(&mut self) {
        let Some(query) = self.debounce.fire() else {
            return;
        };
        match router::route(&self.state.nav, &query) {
            Some(QueryMode::FileBrowse) => {
                // query cleared while a file is open: back to browse page 1
                self.state.results =
                    Some(router::browse_page(&self.state.file_texts, 1, self.state.page_size));
                self.state.redraw = true;
            }
            Some(QueryMode::FileSearch) => {
                self.state.results = Some(router::search_page(
                    &self.state.file_texts,
                    &query,
                    1,
                    self.state.page_size,
                ));
                self.state.redraw = true;
            }
            Some(QueryMode::GlobalSearch) => self.run_global_search(query, 1).await,
            None => {
                // query cleared at home: leave search view entirely
                self.state.go_home();
            }
        }
    }

    /// Re-enter the current mode at `page` (page change, page-size change,
    /// post-mutation refresh).
    async fn refresh_view(&mut self, page: u64) {
        match router::route(&self.state.nav, &self.state.query) {
            Some(QueryMode::FileBrowse) => {
                self.state.results =
                    Some(router::browse_page(&self.state.file_texts, page, self.state.page_size));
                self.state.redraw = true;
            }
            Some(QueryMode::FileSearch) => {
                let query = self.state.query.clone();
                self.state.results = Some(router::search_page(
                    &self.state.file_texts,
                    &query,
                    page,
                    self.state.page_size,
                ));
                self.state.redraw = true;
            }
            Some(QueryMode::GlobalSearch) => {
                let query = self.state.query.clone();
                self.run_global_search(query, page).await;
            }
            None => {
                self.state.results = None;
                self.state.redraw = true;
            }
        }
    }

    // --- retrievals -------------------------------------------------------

    async fn run_global_search(&mut self, query: String, page: u64) {
        let token = self.state.issue_token();
        self.state.main_region = RegionState::Loading;
        self.state.redraw = true;
        self.publish();

        let result = self
            .api
            .search_texts(query.trim(), page, self.state.page_size)
            .await;
        self.apply_global_results(token, &query, page, result);
    }

    /// Apply a global-search response if it is still relevant: latest token,
    /// still in global-search mode, and the query unchanged.
    pub fn apply_global_results(
        &mut self,
        token: u64,
        query: &str,
        page: u64,
        result: Result<SearchPage, AppError>,
    ) {
        let still_relevant = self.state.is_current_token(token)
            && router::route(&self.state.nav, &self.state.query)
                == Some(QueryMode::GlobalSearch)
            && self.state.query.trim() == query.trim();
        if !still_relevant {
            debug!("discarding superseded search response for {query:?}");
            return;
        }
        match result {
            Ok(found) => {
                self.state.main_region = RegionState::Ready;
                self.state.results = Some(router::global_page(
                    found.texts,
                    found.total_texts,
                    query,
                    page,
                    self.state.page_size,
                ));
            }
            Err(e) => {
                warn!("global search failed: {e}");
                self.state.main_region = RegionState::Failed("Search failed.".into());
                self.state.show_error(e.to_string());
            }
        }
        self.state.redraw = true;
    }

    async fn load_file_texts(&mut self, file_id: u64) {
        let token = self.state.issue_token();
        self.state.main_region = RegionState::Loading;
        self.state.redraw = true;
        self.publish();

        let result = self.api.fetch_texts(file_id).await;
        self.apply_file_texts(token, file_id, result);
    }

    /// Apply a per-file buffer load if the same file is still selected and
    /// the token is still the latest.
    pub fn apply_file_texts(
        &mut self,
        token: u64,
        file_id: u64,
        result: Result<Vec<TextEntry>, AppError>,
    ) {
        let still_relevant = self.state.is_current_token(token)
            && self.state.nav.selected_file() == Some(file_id);
        if !still_relevant {
            debug!("discarding superseded entry load for file {file_id}");
            return;
        }
        match result {
            Ok(texts) => {
                self.state.file_texts = texts;
                self.state.main_region = RegionState::Ready;
                // re-enter the current mode at page 1
                let query = self.state.query.clone();
                self.state.results =
                    match router::route(&self.state.nav, &query) {
                        Some(QueryMode::FileSearch) => Some(router::search_page(
                            &self.state.file_texts,
                            &query,
                            1,
                            self.state.page_size,
                        )),
                        _ => Some(router::browse_page(
                            &self.state.file_texts,
                            1,
                            self.state.page_size,
                        )),
                    };
            }
            Err(e) => {
                warn!("loading entries for file {file_id} failed: {e}");
                self.state.main_region = RegionState::Failed("Failed to load entries.".into());
                self.state.show_error(e.to_string());
            }
        }
        self.state.redraw = true;
    }

    /// Reload the hierarchy cache wholesale. At Home this also re-projects
    /// the all-files grid.
    pub async fn reload_hierarchy(&mut self) {
        self.state.sidebar_region = RegionState::Loading;
        self.state.redraw = true;
        self.publish();

        match self.api.fetch_categories().await {
            Ok(payload) => {
                self.state.hierarchy.replace_all(payload);
                self.state.sidebar_region = RegionState::Ready;
                if self.state.nav.is_home() {
                    self.state.go_home();
                }
            }
            Err(e) => {
                warn!("hierarchy load failed: {e}");
                self.state.sidebar_region =
                    RegionState::Failed("Failed to load categories".into());
                self.state.show_error(e.to_string());
            }
        }
        self.state.redraw = true;
    }

    // --- mutations --------------------------------------------------------

    /// Validate → request → notify → refresh. Returns whether the mutation
    /// succeeded. On failure nothing was applied, so retrying is safe.
    pub async fn apply_mutation(&mut self, mutation: Mutation) -> bool {
        if let Err(e) = coordinator::validate(&mutation) {
            self.state.show_error(e.to_string());
            return false;
        }

        match coordinator::execute(&self.api, &mutation).await {
            Ok(()) => {
                self.state.show_success(mutation.success_message());
                // never leave a selection pointing at a deleted entity
                self.force_home_if_selection_deleted(&mutation);
                match mutation.refresh_plan() {
                    RefreshPlan::Hierarchy => self.reload_hierarchy().await,
                    RefreshPlan::FileTexts => {
                        if let Some(file_id) = self.state.nav.selected_file() {
                            self.load_file_texts(file_id).await;
                        }
                    }
                }
                true
            }
            Err(e) => {
                self.state.show_error(e.to_string());
                false
            }
        }
    }

    /// Checked against the *pre-reload* hierarchy, so the transition happens
    /// before the cache reload completes.
    fn force_home_if_selection_deleted(&mut self, mutation: &Mutation) {
        let Some(selected) = self.state.nav.selected_file() else {
            return;
        };
        let orphaned = match mutation {
            Mutation::DeleteFile { file_id } => *file_id == selected,
            Mutation::DeleteCategory { category_id } => self
                .state
                .hierarchy
                .category_owns_file(*category_id, selected),
            _ => false,
        };
        if orphaned {
            self.state.go_home();
        }
    }

    /// Send a snapshot if anything changed since the last one.
    fn publish(&mut self) {
        if self.state.redraw {
            let _ = self.snapshot_tx.send(RenderSnapshot::project(&self.state));
            self.state.redraw = false;
        }
    }
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //
