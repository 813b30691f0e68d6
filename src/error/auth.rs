//! Authentication errors raised locally, before any request is sent.

use thiserror::Error;

/// Local authentication failures.
///
/// `action` completes the sentence "You must be logged in to ...".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The session flag is false.
    #[error("You must be logged in to {action}")]
    NotLoggedIn { action: &'static str },

    /// The identity has no access token to put in the Authorization header.
    #[error("You must be logged in to {action}")]
    MissingAccessToken { action: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(
            AuthError::NotLoggedIn { action: "change your bio" }.to_string(),
            "You must be logged in to change your bio"
        );
        assert_eq!(
            AuthError::MissingAccessToken { action: "change your username" }.to_string(),
            "You must be logged in to change your username"
        );
    }
}
