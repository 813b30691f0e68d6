//! Per-call-site mapping from [`Outcome`] to a user-facing notification.
//!
//! Each operation owns a [`MessageTable`]. [`settle`] is the one place an
//! outcome is matched: success bodies are parsed into the endpoint schema,
//! everything else is reported once and turned into a [`PeerlinkError`].

use serde::de::DeserializeOwned;

use super::outcome::Outcome;
use crate::error::{ErrorCategory, PeerlinkError, PeerlinkResult};
use crate::notifications::{Notification, NotificationSink};

/// Message for every network failure.
pub const NETWORK_MESSAGE: &str = "Error connecting to db";

/// Message for a 200 whose body does not fit the endpoint schema.
pub const SCHEMA_MESSAGE: &str = "Unexpected response from server.";

/// What to show when a call succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessMessage {
    /// Nothing; the view updates silently.
    Silent,
    Fixed(&'static str),
    /// The server's `message` field, or the given text when absent.
    FromServer(&'static str),
}

/// Status-to-message mapping for one call site.
#[derive(Debug, Clone, Copy)]
pub struct MessageTable {
    pub success: SuccessMessage,
    /// Specific messages for individual status codes.
    pub statuses: &'static [(u16, &'static str)],
    /// Statuses for which the server's `message` field wins over `statuses`.
    pub server_message_statuses: &'static [u16],
    /// Used for every other non-success status.
    pub fallback: &'static str,
    pub network: &'static str,
}

impl MessageTable {
    /// A table with one failure message for every status.
    pub const fn uniform(success: SuccessMessage, failure: &'static str) -> Self {
        Self {
            success,
            statuses: &[],
            server_message_statuses: &[],
            fallback: failure,
            network: NETWORK_MESSAGE,
        }
    }

    fn for_status(&self, status: u16, outcome: &Outcome) -> String {
        if self.server_message_statuses.contains(&status) {
            if let Some(message) = outcome.server_message() {
                return message.to_string();
            }
        }
        self.statuses
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, m)| *m)
            .unwrap_or(self.fallback)
            .to_string()
    }

    /// The notification this call site shows for `outcome`, if any.
    pub fn notification_for(&self, outcome: &Outcome) -> Option<Notification> {
        match outcome {
            Outcome::Success { .. } => match self.success {
                SuccessMessage::Silent => None,
                SuccessMessage::Fixed(message) => Some(Notification::success(message)),
                SuccessMessage::FromServer(default) => Some(Notification::success(
                    outcome.server_message().unwrap_or(default),
                )),
            },
            Outcome::ClientError { status, .. }
            | Outcome::ServerError { status, .. }
            | Outcome::UnexpectedStatus { status, .. } => {
                Some(Notification::error(self.for_status(*status, outcome)))
            }
            Outcome::NetworkFailure(_) => Some(Notification::error(self.network)),
        }
    }
}

/// Consume an outcome: parse the success body or report the failure.
///
/// On success the body is parsed into `T` first; the success message is
/// only shown once parsing worked. Every failure path notifies exactly once.
pub fn settle<T: DeserializeOwned>(
    outcome: Outcome,
    table: &MessageTable,
    sink: &dyn NotificationSink,
    endpoint: &str,
) -> PeerlinkResult<T> {
    let notification = table.notification_for(&outcome);
    match outcome {
        Outcome::Success { body, .. } => match serde_json::from_value::<T>(body) {
            Ok(parsed) => {
                if let Some(notification) = notification {
                    sink.notify(notification);
                }
                Ok(parsed)
            }
            Err(e) => {
                tracing::warn!(endpoint, "Response did not match schema: {}", e);
                sink.error(SCHEMA_MESSAGE);
                Err(PeerlinkError::Schema {
                    endpoint: endpoint.to_string(),
                    message: e.to_string(),
                })
            }
        },
        Outcome::ClientError { status, .. }
        | Outcome::ServerError { status, .. }
        | Outcome::UnexpectedStatus { status, .. } => {
            let message = notification
                .map(|n| n.message)
                .unwrap_or_else(|| table.fallback.to_string());
            tracing::warn!(endpoint, status, "Request rejected: {}", message);
            sink.error(&message);
            Err(PeerlinkError::Rejected {
                category: ErrorCategory::from_status(status),
                status,
                message,
            })
        }
        Outcome::NetworkFailure(err) => {
            tracing::warn!(endpoint, "Request failed: {}", err);
            sink.error(table.network);
            Err(PeerlinkError::Network(err))
        }
    }
}

const EDIT_STATUSES: &[(u16, &str)] = &[
    (400, "Bad request. Please check your input."),
    (403, "Unauthorized. Please log in again."),
    (404, "User not found. Please check your username."),
    (500, "Server error. Please try again later."),
];

const PASSWORD_STATUSES: &[(u16, &str)] = &[
    (400, "Bad request. Please check your input."),
    (401, "Unauthorized. Please log in again."),
    (403, "Unauthorized. Please log in again."),
    (404, "User not found. Please check your username."),
    (500, "Server error. Please try again later."),
];

const EDIT_FALLBACK: &str = "An unexpected error occurred. Please try again.";

pub const REGISTER: MessageTable = MessageTable::uniform(
    SuccessMessage::Fixed("Registered successfully!"),
    "Failed to register",
);

pub const LOGIN: MessageTable =
    MessageTable::uniform(SuccessMessage::Fixed("Logged in successfully!"), "Error logging in");

pub const CHANGE_USERNAME: MessageTable = MessageTable::uniform(
    SuccessMessage::Fixed("Username changed successfully!"),
    "Failed to change username",
);

pub const CHANGE_BIO: MessageTable = MessageTable {
    success: SuccessMessage::Fixed("Bio changed successfully!"),
    statuses: EDIT_STATUSES,
    server_message_statuses: &[],
    fallback: EDIT_FALLBACK,
    network: NETWORK_MESSAGE,
};

pub const DELETE_BIO: MessageTable = MessageTable {
    success: SuccessMessage::Fixed("Bio deleted successfully!"),
    ..CHANGE_BIO
};

pub const GET_BIO: MessageTable = MessageTable {
    success: SuccessMessage::Silent,
    ..CHANGE_BIO
};

pub const CHANGE_PASSWORD: MessageTable = MessageTable {
    success: SuccessMessage::Fixed("Password updated successfully!"),
    statuses: PASSWORD_STATUSES,
    server_message_statuses: &[],
    fallback: EDIT_FALLBACK,
    network: NETWORK_MESSAGE,
};

pub const DELETE_ACCOUNT: MessageTable = MessageTable::uniform(
    SuccessMessage::Fixed("User deleted successfully"),
    "Error deleting user",
);

pub const FOLLOW_LIST: MessageTable = MessageTable {
    success: SuccessMessage::Silent,
    statuses: &[
        (404, "Not Found: The requested resource could not be found."),
        (500, "Internal Server Error: Please try again later."),
    ],
    server_message_statuses: &[],
    fallback: "An unexpected error occurred.",
    network: NETWORK_MESSAGE,
};

pub const USER_PROFILE: MessageTable = MessageTable {
    success: SuccessMessage::Silent,
    statuses: &[(404, "User not found"), (500, "Internal server error")],
    server_message_statuses: &[],
    fallback: "An unexpected error occurred",
    network: NETWORK_MESSAGE,
};

pub const SEARCH: MessageTable = MessageTable::uniform(
    SuccessMessage::Silent,
    "Search failed. Please try again later.",
);

pub const FOLLOW: MessageTable = MessageTable {
    success: SuccessMessage::FromServer("Followed successfully!"),
    statuses: &[(500, "Server error. Please try again later.")],
    server_message_statuses: &[400],
    fallback: "An unexpected error occurred.",
    network: NETWORK_MESSAGE,
};

pub const UNFOLLOW: MessageTable = MessageTable {
    success: SuccessMessage::FromServer("Unfollowed successfully!"),
    ..FOLLOW
};
