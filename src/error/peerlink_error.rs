//! Unified error type for the client.

use thiserror::Error;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::validation::ValidationError;
use crate::traits::HttpError;

/// Every way an operation can fail.
///
/// Operations push the user-facing message to the notification sink
/// before returning one of these, so callers mostly branch on
/// [`PeerlinkError::category`].
#[derive(Debug, Clone, Error)]
pub enum PeerlinkError {
    /// Input rejected locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Not logged in or no access token; no request was sent.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The server answered with a non-success status.
    #[error("{message} (status {status})")]
    Rejected {
        category: ErrorCategory,
        status: u16,
        message: String,
    },

    /// The request never completed.
    #[error(transparent)]
    Network(#[from] HttpError),

    /// A success response with a body that does not fit the endpoint schema.
    #[error("unexpected response from {endpoint}: {message}")]
    Schema { endpoint: String, message: String },

    /// The result arrived after its view was unmounted or re-keyed.
    #[error("result discarded: view no longer current")]
    Superseded,

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PeerlinkError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            PeerlinkError::Validation(_) => ErrorCategory::Validation,
            PeerlinkError::Auth(_) => ErrorCategory::Auth,
            PeerlinkError::Rejected { category, .. } => *category,
            PeerlinkError::Network(_) => ErrorCategory::Network,
            PeerlinkError::Schema { .. } => ErrorCategory::Schema,
            PeerlinkError::Superseded => ErrorCategory::UnexpectedStatus,
            PeerlinkError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            PeerlinkError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the request was refused without touching the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            PeerlinkError::Validation(_) | PeerlinkError::Auth(_) | PeerlinkError::Config(_)
        )
    }
}
