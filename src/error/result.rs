//! Result type alias for client operations.

use super::peerlink_error::PeerlinkError;

/// Type alias for Results using PeerlinkError.
pub type PeerlinkResult<T> = Result<T, PeerlinkError>;
