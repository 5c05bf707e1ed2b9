//! src/view/snapshots.rs
//! ============================================================
//! Immutable *data-transfer* structs harvested from the live
//! `AppState` once per transition and consumed by whatever
//! renderer sits on top (HTML, TUI, test assertions).
//!
//! Snapshots are plain owned data with no interior mutability,
//! so no renderer can observe a half-applied transition: the
//! projection is pure and the state it reads is only mutated
//! between projections.

use chrono::{DateTime, Utc};

use crate::api::types::{Category, TextEntry};
use crate::model::app_state::{AppState, Notification, PendingDelete, RegionState};
use crate::model::hierarchy::FileCard;
use crate::model::result_set::QueryMode;
use crate::view::pager::PagerControl;

/// Sidebar region: categories filtered by the sidebar search box.
#[derive(Debug, Clone)]
pub struct SidebarSnapshot {
    pub region: RegionState,
    pub categories: Vec<Category>,
}

/// Main region content.
#[derive(Debug, Clone)]
pub enum MainSnapshot {
    /// A load is in flight for this region only.
    Loading,
    /// The region failed to load and shows an error placeholder.
    Failed(String),
    /// Home: every file across all categories, annotated with its parent.
    HomeGrid(Vec<FileCard>),
    /// One page of entries (may be empty → renderer shows an empty state).
    Entries(Vec<TextEntry>),
}

/// The stats strip under the main title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub page: u64,
}

/// Complete, immutable projection of [`AppState`] for one render.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub title: String,
    pub subtitle: String,
    pub sidebar: SidebarSnapshot,
    pub main: MainSnapshot,
    pub stats: Option<Stats>,
    pub pager: Option<PagerControl>,
    pub notification: Option<Notification>,
    pub pending_delete: Option<PendingDelete>,
}

impl RenderSnapshot {
    /// Pure projection; invoked once per state transition.
    pub fn project(state: &AppState) -> Self {
        let sidebar = SidebarSnapshot {
            region: state.sidebar_region.clone(),
            categories: filter_categories(state.hierarchy.categories(), &state.sidebar_filter),
        };

        let main = match &state.main_region {
            RegionState::Loading => MainSnapshot::Loading,
            RegionState::Failed(msg) => MainSnapshot::Failed(msg.clone()),
            RegionState::Ready => match &state.results {
                Some(rs) => MainSnapshot::Entries(rs.items.clone()),
                None => MainSnapshot::HomeGrid(state.hierarchy.all_files()),
            },
        };

        // hidden at Home and for empty result sets
        let stats = state
            .results
            .as_ref()
            .filter(|rs| rs.total > 0)
            .map(|rs| Stats {
                total: rs.total,
                page: rs.page,
            });
        let pager = state
            .results
            .as_ref()
            .and_then(|rs| PagerControl::build(rs.total, rs.page, rs.page_size));

        let (title, subtitle) = titles(state);

        Self {
            title,
            subtitle,
            sidebar,
            main,
            stats,
            pager,
            notification: state.notification.clone(),
            pending_delete: state.pending_delete.clone(),
        }
    }
}

fn titles(state: &AppState) -> (String, String) {
    if let Some(file_name) = state.nav.selected_file_name() {
        let filtered = state
            .results
            .as_ref()
            .is_some_and(|rs| rs.mode == QueryMode::FileSearch);
        let subtitle = if filtered {
            format!("Filtered by \u{201c}{}\u{201d}", state.query.trim())
        } else {
            "Manage Q&A entries for this file".to_string()
        };
        (file_name.to_string(), subtitle)
    } else if let Some(rs) = &state.results {
        (
            "Search results".to_string(),
            format!("\u{201c}{}\u{201d} across all files", rs.query),
        )
    } else {
        (
            "All Files".to_string(),
            "Select a file to edit or search across all content".to_string(),
        )
    }
}

/// Case-insensitive category-name filter for the sidebar search box.
fn filter_categories(categories: &[Category], filter: &str) -> Vec<Category> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return categories.to_vec();
    }
    categories
        .iter()
        .filter(|c| c.category_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Human-readable timestamp for an entry footer; empty when unknown.
pub fn format_updated_at(updated_at: Option<DateTime<Utc>>) -> String {
    match updated_at {
        Some(ts) => ts.format("%b %-d, %Y %H:%M").to_string(),
        None => String::new(),
    }
}
