//! src/model/app_state.rs
//! ============================================================================
//! # AppState: The Single Owned State Object
//!
//! `AppState` unifies everything the console tracks between events: the
//! hierarchy cache, the navigation machine, the per-file entry buffer, the
//! active query, pagination inputs, notifications, per-region loading
//! state, and the request token that guards against stale responses.
//!
//! There are no ambient globals: every transition function takes `&mut
//! AppState`, and the rendering layer is a pure projection of this struct
//! (`view::snapshots`).

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::api::types::TextEntry;
use crate::config::config::Config;
use crate::controller::coordinator::Mutation;
use crate::model::hierarchy::HierarchyCache;
use crate::model::nav::NavState;
use crate::model::result_set::ResultSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss_ms: Option<u64>,
}

/// Loading state of one independently refreshed screen region. One
/// in-flight load never blocks rendering of the other region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegionState {
    #[default]
    Ready,
    Loading,
    /// The region failed to load and shows an error placeholder.
    Failed(String),
}

/// An armed delete confirmation. The message states the cascading
/// consequence; the request is only issued on explicit confirmation.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub title: String,
    pub message: String,
    pub mutation: Mutation,
}

/// Core application state. See module docs.
#[derive(Debug)]
pub struct AppState {
    pub config: Arc<Config>,
    pub hierarchy: HierarchyCache,
    pub nav: NavState,
    /// Full entry list of the selected file, loaded once per selection and
    /// only ever replaced wholesale.
    pub file_texts: Vec<TextEntry>,
    /// Current search text (raw, untrimmed).
    pub query: String,
    /// Sidebar category-name filter (client-side only).
    pub sidebar_filter: String,
    pub page_size: usize,
    /// The last computed result set, if entries are being shown.
    pub results: Option<ResultSet>,
    pub pending_delete: Option<PendingDelete>,
    pub notification: Option<Notification>,
    pub sidebar_region: RegionState,
    pub main_region: RegionState,
    /// Monotonically increasing request token; only a response carrying the
    /// latest token may be applied.
    latest_token: u64,
    pub redraw: bool,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        let page_size = config.page_size;
        Self {
            config,
            hierarchy: HierarchyCache::new(),
            nav: NavState::Home,
            file_texts: Vec::new(),
            query: String::new(),
            sidebar_filter: String::new(),
            page_size,
            results: None,
            pending_delete: None,
            notification: None,
            sidebar_region: RegionState::Ready,
            main_region: RegionState::Ready,
            latest_token: 0,
            redraw: true,
        }
    }

    // --- request tokens ---

    /// Issue a fresh token for an outgoing retrieval, superseding all
    /// earlier ones.
    pub fn issue_token(&mut self) -> u64 {
        self.latest_token += 1;
        self.latest_token
    }

    /// Whether a response token is still the latest issued.
    pub fn is_current_token(&self, token: u64) -> bool {
        token == self.latest_token
    }

    /// Supersede any in-flight retrieval without issuing a new one.
    pub fn invalidate_inflight(&mut self) {
        self.latest_token += 1;
    }

    // --- navigation transitions ---

    /// Any state → `FileSelected`. Clears the active search text and the
    /// stale buffer; the caller loads the new buffer and renders page 1.
    pub fn select_file(&mut self, file_id: u64, file_name: impl Into<String>) {
        let file_name = file_name.into();
        info!("selecting file {file_id} ({file_name})");
        self.nav = NavState::FileSelected { file_id, file_name };
        self.query.clear();
        self.file_texts.clear();
        self.results = None;
        self.invalidate_inflight();
        self.redraw = true;
    }

    /// Any state → `Home`. Clears selection, query, results, and stats.
    pub fn go_home(&mut self) {
        info!("navigating home");
        self.nav = NavState::Home;
        self.query.clear();
        self.file_texts.clear();
        self.results = None;
        self.main_region = RegionState::Ready;
        self.invalidate_inflight();
        self.redraw = true;
    }

    // --- notifications ---

    fn notify(&mut self, message: String, level: NotificationLevel, auto_dismiss_ms: Option<u64>) {
        self.notification = Some(Notification {
            message,
            level,
            timestamp: Instant::now(),
            auto_dismiss_ms,
        });
        self.redraw = true;
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{message}");
        self.notify(message, NotificationLevel::Success, Some(3000));
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{message}");
        self.notify(message, NotificationLevel::Error, None);
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.notify(message, NotificationLevel::Info, Some(3000));
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
        self.redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(Arc::new(Config::default()))
    }

    #[test]
    fn select_file_clears_query_and_buffer() {
        let mut s = state();
        s.query = "pending".into();
        s.file_texts.push(crate::api::types::TextEntry {
            text_id: "t1".into(),
            question: "q".into(),
            answer: "a".into(),
            text_author: "me".into(),
            updated_at: None,
        });
        s.select_file(9, "F");
        assert_eq!(s.nav.selected_file(), Some(9));
        assert!(s.query.is_empty());
        assert!(s.file_texts.is_empty());
        assert!(s.results.is_none());
    }

    #[test]
    fn go_home_resets_everything() {
        let mut s = state();
        s.select_file(9, "F");
        s.query = "abc".into();
        s.go_home();
        assert!(s.nav.is_home());
        assert!(s.query.is_empty());
        assert!(s.results.is_none());
    }

    #[test]
    fn stale_tokens_are_rejected() {
        let mut s = state();
        let t1 = s.issue_token();
        assert!(s.is_current_token(t1));
        let t2 = s.issue_token();
        assert!(!s.is_current_token(t1));
        assert!(s.is_current_token(t2));
        s.invalidate_inflight();
        assert!(!s.is_current_token(t2));
    }
}
