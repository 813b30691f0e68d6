//! Error category classification.
//!
//! Every failure the client can surface falls into one of these buckets;
//! the bucket decides retryability and the log label.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Input rejected locally before any request was sent.
    Validation,

    /// Server rejected the request as malformed (400).
    BadRequest,

    /// Missing token locally, or 401/403 from the server.
    Auth,

    /// The addressed user or resource does not exist (404).
    NotFound,

    /// Backend failure (500).
    Server,

    /// Any status code the call site has no specific handling for.
    UnexpectedStatus,

    /// The request never completed.
    Network,

    /// A 200 response whose body did not match the endpoint schema.
    Schema,

    /// Invalid client configuration.
    Configuration,
}

impl ErrorCategory {
    /// Classify an HTTP status the server returned.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorCategory::BadRequest,
            401 | 403 => ErrorCategory::Auth,
            404 => ErrorCategory::NotFound,
            500 => ErrorCategory::Server,
            _ => ErrorCategory::UnexpectedStatus,
        }
    }

    /// Returns true if errors in this category are generally transient.
    ///
    /// Nothing retries automatically; callers may use this to offer a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::BadRequest => "bad_request",
            ErrorCategory::Auth => "auth",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Server => "server",
            ErrorCategory::UnexpectedStatus => "unexpected_status",
            ErrorCategory::Network => "network",
            ErrorCategory::Schema => "schema",
            ErrorCategory::Configuration => "configuration",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(ErrorCategory::from_status(400), ErrorCategory::BadRequest);
        assert_eq!(ErrorCategory::from_status(401), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_status(403), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_status(404), ErrorCategory::NotFound);
        assert_eq!(ErrorCategory::from_status(500), ErrorCategory::Server);
        assert_eq!(ErrorCategory::from_status(418), ErrorCategory::UnexpectedStatus);
        assert_eq!(ErrorCategory::from_status(503), ErrorCategory::UnexpectedStatus);
    }

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::Validation.is_retryable());
        assert!(!ErrorCategory::Schema.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::NotFound), "not_found");
        assert_eq!(ErrorCategory::UnexpectedStatus.as_str(), "unexpected_status");
    }
}
