//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - sends a [`Request`], returns a [`Response`]
//! - [`NotificationSink`](crate::notifications::NotificationSink) lives with
//!   the notification queue it abstracts.

pub mod http;

pub use http::{Headers, HttpClient, HttpError, Method, Request, Response};
