//! peerlink - client-side session, identity and data reconciliation for a
//! follower/following social API.
//!
//! This library exposes modules for use in integration tests and by view
//! layers that drive it.

pub mod actions;
pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod gate;
pub mod gateway;
pub mod logging;
pub mod notifications;
pub mod reconcile;
pub mod state;
pub mod traits;
pub mod validation;

pub use actions::{Actions, Registration};
pub use config::ClientConfig;
pub use error::{PeerlinkError, PeerlinkResult};
pub use gate::{guard, GateDecision, Navigation, View};
pub use gateway::{Gateway, Outcome};
pub use notifications::{Notification, NotificationSink, Severity, ToastQueue};
pub use reconcile::{GraphView, SearchView, ViewPhase};
pub use state::{AppState, Identity, IdentityStore, SessionStore};
