//! Mock implementations for testing.
//!
//! Enables unit testing of the gateway, actions and views without network
//! access.
//!
//! - [`MockHttpClient`] - HTTP client with configurable, recordable responses

pub mod http;

pub use http::{MockHttpClient, MockResponse};
