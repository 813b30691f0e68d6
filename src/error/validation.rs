//! Client-side validation errors.
//!
//! The `Display` text of each variant is exactly the message shown to the
//! user, so a validation failure can be pushed to the notification sink
//! as-is.

use thiserror::Error;

/// Input rejected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill out all fields.")]
    MissingFields,

    #[error("Username must be 3-20 characters long and can only contain letters, numbers, and underscores.")]
    InvalidUsername,

    #[error("Password must be at least 8 characters long and contain at least one letter, one number, and one special character.")]
    InvalidPassword,

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("Please enter a username")]
    EmptyUsername,

    #[error("Please enter a bio")]
    EmptyBio,

    #[error("Please enter a password")]
    EmptyPassword,

    #[error("You cannot follow yourself")]
    SelfFollow,
}
