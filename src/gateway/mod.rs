//! Remote gateway: typed endpoints, outcome classification, response
//! schemas and per-call-site messages.

pub mod client;
pub mod endpoint;
pub mod messages;
pub mod outcome;
pub mod schema;

pub use client::Gateway;
pub use endpoint::Endpoint;
pub use messages::{settle, MessageTable, SuccessMessage, NETWORK_MESSAGE, SCHEMA_MESSAGE};
pub use outcome::{Outcome, OutcomeKind};
