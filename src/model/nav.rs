//! src/model/nav.rs
//! ============================================================================
//! # NavState: Selection & Navigation State Machine
//!
//! Exactly two states exist: `Home` and `FileSelected`. The machine is
//! driven only by commands and by mutation side effects (a cascading delete
//! of the selected file's owner forces `Home`), never by timers.

/// Current navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Home,
    FileSelected {
        file_id: u64,
        file_name: String,
    },
}

impl NavState {
    pub fn is_home(&self) -> bool {
        matches!(self, NavState::Home)
    }

    /// The selected file id, if any.
    pub fn selected_file(&self) -> Option<u64> {
        match self {
            NavState::Home => None,
            NavState::FileSelected { file_id, .. } => Some(*file_id),
        }
    }

    pub fn selected_file_name(&self) -> Option<&str> {
        match self {
            NavState::Home => None,
            NavState::FileSelected { file_name, .. } => Some(file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_selects_nothing() {
        assert!(NavState::Home.is_home());
        assert_eq!(NavState::Home.selected_file(), None);
    }

    #[test]
    fn file_selected_exposes_id_and_name() {
        let nav = NavState::FileSelected {
            file_id: 9,
            file_name: "F".into(),
        };
        assert_eq!(nav.selected_file(), Some(9));
        assert_eq!(nav.selected_file_name(), Some("F"));
    }
}
