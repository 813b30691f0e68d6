//! User-initiated operations.
//!
//! Each operation validates locally, calls the gateway, and on success
//! writes to the stores in [`AppState`]. Every failure produces exactly one
//! notification and leaves the stores as they were.

mod auth;
mod follow;
mod profile;

use serde::Serialize;
use serde_json::Value;

pub use auth::Registration;

use crate::error::{AuthError, PeerlinkError, PeerlinkResult};
use crate::gateway::{settle, Endpoint, Gateway, MessageTable};
use crate::notifications::NotificationSink;
use crate::state::AppState;
use crate::traits::HttpClient;

/// Operations bound to one gateway and one set of stores.
pub struct Actions<C: HttpClient> {
    gateway: Gateway<C>,
    state: AppState,
}

impl<C: HttpClient> Clone for Actions<C> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            state: self.state.clone(),
        }
    }
}

/// Who is acting, captured when the operation starts.
#[derive(Debug, Clone)]
struct Credentials {
    username: String,
    token: String,
}

impl<C: HttpClient> Actions<C> {
    pub fn new(gateway: Gateway<C>, state: AppState) -> Self {
        Self { gateway, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn gateway(&self) -> &Gateway<C> {
        &self.gateway
    }

    fn sink(&self) -> &dyn NotificationSink {
        self.state.notifications.as_ref()
    }

    /// Report a local failure and return it.
    fn reject<T>(&self, err: impl Into<PeerlinkError>) -> PeerlinkResult<T> {
        let err = err.into();
        tracing::debug!(category = %err.category(), "Refused before sending: {}", err);
        self.sink().error(&err.to_string());
        Err(err)
    }

    /// Username and token of the logged-in user, or an auth error.
    fn credentials(&self, action: &'static str) -> PeerlinkResult<Credentials> {
        if !self.state.session.is_logged_in() {
            return self.reject(AuthError::NotLoggedIn { action });
        }
        let identity = self.state.identity.snapshot();
        match identity.access_token() {
            Some(token) => Ok(Credentials {
                username: identity.username.clone(),
                token: token.to_string(),
            }),
            None => self.reject(AuthError::MissingAccessToken { action }),
        }
    }

    /// Send an authenticated request and settle its outcome.
    async fn authorized<T: serde::de::DeserializeOwned>(
        &self,
        credentials: &Credentials,
        endpoint: Endpoint,
        body: Option<Value>,
        table: &MessageTable,
        action: &'static str,
    ) -> PeerlinkResult<T> {
        let outcome = match self
            .gateway
            .request_authorized(&endpoint, body.as_ref(), Some(&credentials.token), action)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => return self.reject(e),
        };
        settle(outcome, table, self.sink(), &endpoint.path())
    }

    /// Send an unauthenticated request and settle its outcome.
    async fn public<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<Value>,
        table: &MessageTable,
    ) -> PeerlinkResult<T> {
        let outcome = match self.gateway.request(&endpoint, body.as_ref()).await {
            Ok(outcome) => outcome,
            Err(e) => return self.reject(e),
        };
        settle(outcome, table, self.sink(), &endpoint.path())
    }
}

fn encode<T: Serialize>(body: &T) -> PeerlinkResult<Value> {
    serde_json::to_value(body).map_err(|e| PeerlinkError::Schema {
        endpoint: "request body".to_string(),
        message: e.to_string(),
    })
}
