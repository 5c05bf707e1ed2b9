//! src/util/debounce.rs
//! ============================================================================
//! # DebounceGate: Trailing-Edge Search Debouncing
//!
//! Delays a search until the input has been quiet for a fixed window.
//! Arming the gate replaces any pending deadline, so only the most recent
//! input in a burst ever fires: at most one retrieval per burst of
//! keystrokes.

use std::time::Duration;
use tokio::time::Instant;

/// Single-slot trailing-edge debouncer for the search box.
#[derive(Debug)]
pub struct DebounceGate {
    window: Duration,
    pending: Option<(Instant, String)>,
}

impl DebounceGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedule `query` to fire after the quiescence window, cancelling any
    /// earlier pending input.
    pub fn arm(&mut self, query: impl Into<String>) {
        self.pending = Some((Instant::now() + self.window, query.into()));
    }

    /// Drop any pending input without firing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Deadline of the pending input, for `tokio::time::sleep_until`.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending query. The event loop calls this when the deadline
    /// elapses.
    pub fn fire(&mut self) -> Option<String> {
        self.pending.take().map(|(_, query)| query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_keeps_only_last_input() {
        let mut gate = DebounceGate::new(Duration::from_millis(300));
        gate.arm("a");
        gate.arm("ab");
        gate.arm("abc");
        assert_eq!(gate.fire().as_deref(), Some("abc"));
        // nothing left to fire: one retrieval per burst
        assert_eq!(gate.fire(), None);
    }

    #[test]
    fn rearm_pushes_deadline_forward() {
        let mut gate = DebounceGate::new(Duration::from_millis(300));
        gate.arm("a");
        let first = gate.deadline().unwrap();
        gate.arm("ab");
        let second = gate.deadline().unwrap();
        assert!(second >= first);
    }

    #[test]
    fn cancel_clears_pending() {
        let mut gate = DebounceGate::new(Duration::from_millis(300));
        gate.arm("a");
        gate.cancel();
        assert!(!gate.is_armed());
        assert_eq!(gate.fire(), None);
    }
}
