//! Data reconciliation for views that fetch on mount.
//!
//! A view moves through [`ViewPhase`]: the gate runs first, then the
//! fetches, then the view is loaded. Each mount takes a [`Ticket`] from the
//! view's [`Generation`]; results that come back after a newer mount, or
//! after unmount, no longer hold the current ticket and are dropped.

mod graph;
mod search;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub use graph::{FollowList, GraphSnapshot, GraphView};
pub use search::{SearchSnapshot, SearchView};

use crate::gate::View;

/// Lifecycle of one mount of a protected view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewPhase {
    /// Gate not yet evaluated.
    #[default]
    Unresolved,
    /// Logged out; the router should go to the given view. Terminal.
    Redirected(View),
    /// Fetches in flight.
    Loading,
    /// Every fetch of this mount has resolved. Terminal for the mount.
    Loaded,
}

impl ViewPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewPhase::Redirected(_) | ViewPhase::Loaded)
    }
}

/// Monotonic mount counter shared by a view and its clones.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new mount, invalidating every earlier ticket.
    pub fn begin(&self) -> Ticket {
        let id = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            id,
            counter: Arc::clone(&self.0),
        }
    }

    /// Invalidate every outstanding ticket.
    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Proof that a result belongs to a particular mount.
#[derive(Debug, Clone)]
pub struct Ticket {
    id: u64,
    counter: Arc<AtomicU64>,
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ticket_supersedes_old() {
        let generation = Generation::new();
        let first = generation.begin();
        assert!(first.is_current());

        let second = generation.begin();
        assert!(!first.is_current());
        assert!(second.is_current());

        generation.invalidate();
        assert!(!second.is_current());
    }

    #[test]
    fn test_clones_share_counter() {
        let generation = Generation::new();
        let ticket = generation.begin();
        generation.clone().begin();
        assert!(!ticket.is_current());
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!ViewPhase::Unresolved.is_terminal());
        assert!(!ViewPhase::Loading.is_terminal());
        assert!(ViewPhase::Loaded.is_terminal());
        assert!(ViewPhase::Redirected(View::Home).is_terminal());
    }
}
