//! Client-side input validation.
//!
//! All checks run before any request is built; a failure means zero
//! network calls.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,20}$").expect("username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$").expect("email regex")
});

/// Special characters a password must draw at least one from.
pub const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Minimum password length.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Letters, digits and underscores, 3-20 characters.
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// `local@domain.tld` with a 2-4 character final label.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least 8 characters drawn from letters, digits and `@$!%*?&`, with at
/// least one lowercase letter, one uppercase letter, one digit and one
/// special character.
pub fn is_valid_password(password: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);

    password.chars().count() >= PASSWORD_MIN_LEN
        && password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Validate a registration form.
///
/// Checks run in a fixed order and stop at the first failure, so exactly
/// one message is produced: empty fields, username, password, email.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_username(username) {
        return Err(ValidationError::InvalidUsername);
    }
    if !is_valid_password(password) {
        return Err(ValidationError::InvalidPassword);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate a login form. The server judges the credentials themselves.
pub fn validate_login(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

/// Validate a requested new username.
pub fn validate_new_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if !is_valid_username(username) {
        return Err(ValidationError::InvalidUsername);
    }
    Ok(())
}

/// Validate a requested new bio.
pub fn validate_bio(bio: &str) -> Result<(), ValidationError> {
    if bio.trim().is_empty() {
        return Err(ValidationError::EmptyBio);
    }
    Ok(())
}

/// Validate a requested new password.
pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    if !is_valid_password(password) {
        return Err(ValidationError::InvalidPassword);
    }
    Ok(())
}
