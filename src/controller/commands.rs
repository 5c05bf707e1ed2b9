//! src/controller/commands.rs
//! ============================================================================
//! # Commands: Centralized Console Actions
//!
//! Defines the `Command` enum, the finite set of named actions the console
//! responds to. Every user interaction arrives here; the rendering layer is
//! a pure projection of the state these commands produce.

use crate::controller::coordinator::Mutation;

/// A high-level command dispatched into the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open a file: any state → `FileSelected`, loads its entry buffer.
    SelectFile { file_id: u64, file_name: String },
    /// Return to the all-files grid.
    GoHome,
    /// A keystroke in the main search box (debounced before retrieval).
    SearchInput(String),
    /// Jump to a page of the current result set.
    ChangePage(u64),
    /// Change entries-per-page; re-enters the current mode at page 1.
    SetPageSize(usize),
    /// Filter sidebar categories by name (client-side, no debounce).
    FilterSidebar(String),
    /// Reload the hierarchy cache from the server.
    ReloadHierarchy,
    /// Run a create/update mutation through the coordinator.
    Mutate(Mutation),
    /// Arm the delete-confirmation step for a target.
    RequestDelete(DeleteTarget),
    /// Execute the armed delete.
    ConfirmDelete,
    /// Disarm the delete-confirmation step.
    CancelDelete,
    /// Dismiss the current notification.
    DismissNotification,
    /// Stop the event loop.
    Quit,
}

/// What a delete confirmation is armed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Category { category_id: u64 },
    File { file_id: u64 },
    Text { text_id: String },
}
