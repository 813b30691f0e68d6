//! Error handling for the client.
//!
//! | Category | Raised when | Retryable |
//! |----------|-------------|-----------|
//! | Validation | input fails local checks | No |
//! | BadRequest | server answered 400 | No |
//! | Auth | no token locally, or 401/403 | No |
//! | NotFound | server answered 404 | No |
//! | Server | server answered 500 | Yes |
//! | UnexpectedStatus | any other status | No |
//! | Network | request never completed | Yes |
//! | Schema | 200 with a body of the wrong shape | No |
//!
//! No failure is fatal: each one becomes a notification and leaves stored
//! state as it was before the call.

mod auth;
mod category;
mod peerlink_error;
mod result;
mod validation;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use peerlink_error::PeerlinkError;
pub use result::PeerlinkResult;
pub use validation::ValidationError;
