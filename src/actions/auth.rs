use super::{encode, Actions};
use crate::error::PeerlinkResult;
use crate::gate::{Navigation, View};
use crate::gateway::messages;
use crate::gateway::schema::{AuthResponse, LoginRequest, RegisterRequest};
use crate::gateway::Endpoint;
use crate::traits::HttpClient;
use crate::validation::{validate_login, validate_registration};

/// Fields of the sign-up form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub bio: Option<&'a str>,
}

impl<C: HttpClient> Actions<C> {
    /// Create an account and sign in as it.
    pub async fn register(&self, form: Registration<'_>) -> PeerlinkResult<Navigation> {
        if let Err(e) = validate_registration(form.username, form.email, form.password) {
            return self.reject(e);
        }

        let body = encode(&RegisterRequest {
            username: form.username,
            email: form.email,
            password: form.password,
            bio: form.bio,
        })?;
        let response: AuthResponse = self
            .public(Endpoint::Register, Some(body), &messages::REGISTER)
            .await?;

        tracing::info!(username = %response.username, "Registered");
        self.state.sign_in(response.into_identity());
        Ok(Navigation::to(View::Profile))
    }

    /// Authenticate and establish the session.
    pub async fn login(&self, username: &str, password: &str) -> PeerlinkResult<Navigation> {
        if let Err(e) = validate_login(username, password) {
            return self.reject(e);
        }

        let body = encode(&LoginRequest { username, password })?;
        let response: AuthResponse = self
            .public(Endpoint::Login, Some(body), &messages::LOGIN)
            .await?;

        tracing::info!(username = %response.username, "Logged in");
        self.state.sign_in(response.into_identity());
        Ok(Navigation::to(View::Dashboard))
    }

    /// Drop the session. Purely local; always succeeds.
    pub fn logout(&self) -> Navigation {
        tracing::info!(username = %self.state.identity.username(), "Logged out");
        self.state.sign_out();
        Navigation::to(View::Home)
    }
}
