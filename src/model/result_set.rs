//! src/model/result_set.rs
//! ============================================================================
//! # ResultSet: Transient Paginated View of Entries
//!
//! A derived value, recomputed on every navigation/search/page event and
//! never persisted. `total` always counts the full (filtered) set, so
//! `total >= items.len()` holds for every mode.

use crate::api::types::TextEntry;

/// Which retrieval strategy produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// File selected, empty query: client-side slice of the file buffer.
    FileBrowse,
    /// File selected, query present: client-side filter + slice.
    FileSearch,
    /// No file selected, query present: server-side search.
    GlobalSearch,
}

/// One page of entries plus the pagination inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub items: Vec<TextEntry>,
    pub total: usize,
    pub page: u64,
    pub page_size: usize,
    pub mode: QueryMode,
    pub query: String,
}
