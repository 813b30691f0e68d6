//! Client-side state containers.
//!
//! - [`SessionStore`]: the `is_logged_in` flag
//! - [`IdentityStore`]: the current user's [`Identity`]
//! - [`AppState`]: both stores plus the notification sink, handed to
//!   actions and views explicitly instead of living in globals

pub mod identity;
pub mod session;

use std::sync::Arc;

use crate::notifications::{NotificationSink, ToastQueue};

pub use identity::{FollowRef, Identity, IdentityPatch, IdentityStore};
pub use session::SessionStore;

/// Everything an action or view needs to read and mutate.
///
/// Cheap to clone; clones share the same stores and sink.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub identity: IdentityStore,
    pub notifications: Arc<dyn NotificationSink>,
}

impl AppState {
    pub fn new(notifications: Arc<dyn NotificationSink>) -> Self {
        Self {
            session: SessionStore::new(),
            identity: IdentityStore::new(),
            notifications,
        }
    }

    /// State backed by a [`ToastQueue`]; the queue handle is returned so the
    /// caller can drain it.
    pub fn with_toast_queue() -> (Self, ToastQueue) {
        let queue = ToastQueue::new();
        (Self::new(Arc::new(queue.clone())), queue)
    }

    /// Establish a logged-in session for `identity`.
    pub fn sign_in(&self, identity: Identity) {
        self.identity.set(identity);
        self.session.set_logged_in(true);
    }

    /// Drop back to the logged-out, all-empty state.
    pub fn sign_out(&self) {
        self.session.set_logged_in(false);
        self.identity.clear();
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session", &self.session.is_logged_in())
            .field("username", &self.identity.username())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_and_out() {
        let (state, _queue) = AppState::with_toast_queue();
        state.sign_in(Identity {
            username: "alice".to_string(),
            access_token: Some("t".to_string()),
            ..Identity::default()
        });
        assert!(state.session.is_logged_in());
        assert_eq!(state.identity.username(), "alice");

        state.sign_out();
        assert!(!state.session.is_logged_in());
        assert!(state.identity.snapshot().is_empty());
    }
}
