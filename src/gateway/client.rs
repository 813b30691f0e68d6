//! The remote gateway: builds requests and classifies what comes back.

use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use super::endpoint::Endpoint;
use super::outcome::Outcome;
use crate::config::ClientConfig;
use crate::error::AuthError;
use crate::traits::{HttpClient, Method, Request};

/// Issues JSON requests against the configured API.
///
/// Generic over the transport so tests can swap in
/// [`MockHttpClient`](crate::adapters::MockHttpClient).
pub struct Gateway<C: HttpClient> {
    http: Arc<C>,
    config: ClientConfig,
}

impl<C: HttpClient> Clone for Gateway<C> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            config: self.config.clone(),
        }
    }
}

impl<C: HttpClient> std::fmt::Debug for Gateway<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("api_base_url", &self.config.api_base_url)
            .finish()
    }
}

impl<C: HttpClient> Gateway<C> {
    pub fn new(http: C, config: ClientConfig) -> Self {
        Self::with_shared(Arc::new(http), config)
    }

    /// Build a gateway around a transport the caller keeps a handle to.
    pub fn with_shared(http: Arc<C>, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &Arc<C> {
        &self.http
    }

    /// Send one request and classify the result.
    ///
    /// Always sets `Content-Type: application/json`; adds
    /// `Authorization: Bearer <token>` when a non-empty token is given and
    /// serializes `body` when present. Never fails: transport errors come
    /// back as [`Outcome::NetworkFailure`].
    pub async fn call(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
        auth_token: Option<&str>,
    ) -> Outcome {
        let url = self.config.endpoint(path);
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!("gateway_call", %request_id, %method, path);

        async move {
            let mut request =
                Request::new(method, url).with_header("Content-Type", "application/json");
            if let Some(token) = auth_token.filter(|t| !t.is_empty()) {
                request = request.with_header("Authorization", format!("Bearer {}", token));
            }
            if let Some(body) = body {
                request = request.with_body(body.to_string());
            }

            tracing::debug!(
                authenticated = request.header("Authorization").is_some(),
                has_body = request.body.is_some(),
                "Sending request"
            );

            let result = self.http.execute(request).await;
            let outcome = Outcome::classify(result);

            match outcome.status() {
                Some(status) => tracing::debug!(status, kind = ?outcome.kind(), "Request finished"),
                None => tracing::debug!(kind = ?outcome.kind(), "Request did not complete"),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    /// Call a public endpoint without credentials.
    ///
    /// Endpoints that need a bearer token are refused with
    /// [`AuthError::MissingAccessToken`] before anything is sent; use
    /// [`Gateway::request_authorized`] for those.
    pub async fn request(
        &self,
        endpoint: &Endpoint,
        body: Option<&Value>,
    ) -> Result<Outcome, AuthError> {
        if endpoint.requires_auth() {
            tracing::warn!(path = %endpoint.path(), "Refusing unauthenticated call to protected endpoint");
            return Err(AuthError::MissingAccessToken {
                action: "make this request",
            });
        }
        Ok(self
            .call(&endpoint.path(), endpoint.method(), body, None)
            .await)
    }

    /// Call a typed endpoint with a bearer token.
    ///
    /// A missing or empty token fails with [`AuthError::MissingAccessToken`]
    /// before anything is sent.
    pub async fn request_authorized(
        &self,
        endpoint: &Endpoint,
        body: Option<&Value>,
        token: Option<&str>,
        action: &'static str,
    ) -> Result<Outcome, AuthError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingAccessToken { action })?;
        Ok(self
            .call(&endpoint.path(), endpoint.method(), body, Some(token))
            .await)
    }
}
