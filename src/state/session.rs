//! Session flag: whether a user is logged in.
//!
//! Only login, registration, logout and account deletion write it. Views
//! subscribe so their gate is re-evaluated on every change.

use std::sync::Arc;

use tokio::sync::watch;

/// Observable `is_logged_in` flag. Clones share the same flag.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// New session, logged out.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn is_logged_in(&self) -> bool {
        *self.tx.borrow()
    }

    /// Write the flag. Subscribers are only woken when the value changes.
    pub fn set_logged_in(&self, logged_in: bool) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == logged_in {
                false
            } else {
                *current = logged_in;
                true
            }
        });
        if changed {
            tracing::info!(logged_in, "Session changed");
        }
    }

    /// Receiver that observes every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
