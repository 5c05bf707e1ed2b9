//! lib.rs — Main Library Entry for the Knowledge-Base Admin Console
//! ----------------------------------------------------------------
//! Explicitly exposes api, model, controller, and view modules.
//! Only re-export what you want public in the library crate root.

/// --- Error handling (unified error type for app) ---
pub mod error;

/// --- Configuration: base URL, page size, debounce window ---
pub mod config {
    pub mod config;
}

/// --- REST collaborator: wire types and the API seam ---
pub mod api {
    pub mod client;
    pub mod types;
}

/// --- State/data models (MVC model) ---
pub mod model {
    pub mod app_state;
    pub mod hierarchy;
    pub mod nav;
    pub mod result_set;
}

/// --- Controller/event loop (main async event handling) ---
pub mod controller {
    pub mod commands;
    pub mod coordinator;
    pub mod event_loop;
    pub mod router;
}

/// --- View: pure projections of state, pagination controls ---
pub mod view {
    pub mod console;
    pub mod pager;
    pub mod snapshots;
}

/// --- Small shared utilities ---
pub mod util {
    pub mod debounce;
}

pub mod logging;
pub use logging::Logger;

/// --- Crate-level re-exports for the most important types ---
pub use error::AppError;
pub use model::{app_state::AppState, hierarchy::HierarchyCache, nav::NavState};
