//! Common test utilities for integration tests.
//!
//! [`TestHarness`] wires the real reqwest adapter to a wiremock server, so
//! these tests exercise the whole path from action to HTTP and back.
//!
//! # Example
//!
//! ```ignore
//! let harness = TestHarness::start().await;
//! mount_json(&harness.server, "POST", "/api/login", 200, login_body("alice")).await;
//! harness.actions.login("alice", "pw").await.unwrap();
//! ```

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use std::time::Duration;

use peerlink::actions::Actions;
use peerlink::adapters::ReqwestHttpClient;
use peerlink::config::ClientConfig;
use peerlink::gateway::Gateway;
use peerlink::notifications::ToastQueue;
use peerlink::state::{AppState, Identity};
use wiremock::MockServer;

/// A mock API server plus a client stack pointed at it.
pub struct TestHarness {
    pub server: MockServer,
    pub gateway: Gateway<ReqwestHttpClient>,
    pub state: AppState,
    pub toasts: ToastQueue,
    pub actions: Actions<ReqwestHttpClient>,
}

#[allow(dead_code)]
impl TestHarness {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let config = ClientConfig::new()
            .with_api_base_url(format!("{}/api", server.uri()))
            .with_request_timeout(Duration::from_secs(5));
        Self::with_config(server, config)
    }

    fn with_config(server: MockServer, config: ClientConfig) -> Self {
        let http = ReqwestHttpClient::from_config(&config).expect("http client");
        let gateway = Gateway::new(http, config);
        let (state, toasts) = AppState::with_toast_queue();
        let actions = Actions::new(gateway.clone(), state.clone());
        Self {
            server,
            gateway,
            state,
            toasts,
            actions,
        }
    }

    /// Requests the server has seen so far.
    pub async fn requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    pub fn sign_in(&self, identity: Identity) {
        self.state.sign_in(identity);
    }

    /// Messages queued so far, oldest first.
    pub fn toast_messages(&self) -> Vec<String> {
        self.toasts.drain().into_iter().map(|t| t.message).collect()
    }
}

/// A logged-in identity with a token.
#[allow(dead_code)]
pub fn identity(username: &str) -> Identity {
    Identity {
        user_id: "42".to_string(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        date_joined: "Fri, 05 Jan 2024 09:00:00 GMT".to_string(),
        access_token: Some(format!("token-{}", username)),
        bio: Some("hello".to_string()),
        followers: None,
        following: None,
    }
}

/// Gateway whose base URL points at a port nothing listens on.
#[allow(dead_code)]
pub fn unreachable_gateway() -> Gateway<ReqwestHttpClient> {
    let config = ClientConfig::new()
        .with_api_base_url("http://127.0.0.1:9/api")
        .with_request_timeout(Duration::from_secs(2));
    let http = ReqwestHttpClient::from_config(&config).expect("http client");
    Gateway::new(http, config)
}
