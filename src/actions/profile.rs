use super::{encode, Actions};
use crate::error::{PeerlinkResult, ValidationError};
use crate::gate::{Navigation, View};
use crate::gateway::messages;
use crate::gateway::schema::{
    Acknowledgement, BioRequest, BioResponse, PasswordChangeRequest, UserProfile,
    UsernameChangeRequest, UsernameChangeResponse,
};
use crate::gateway::Endpoint;
use crate::state::IdentityPatch;
use crate::traits::HttpClient;
use crate::validation::{validate_bio, validate_new_password, validate_new_username};

impl<C: HttpClient> Actions<C> {
    /// Delete the current account and sign out.
    pub async fn delete_account(&self) -> PeerlinkResult<Navigation> {
        const ACTION: &str = "delete your account";
        let creds = self.credentials(ACTION)?;

        let _: Acknowledgement = self
            .authorized(
                &creds,
                Endpoint::DeleteUser {
                    username: creds.username.clone(),
                },
                None,
                &messages::DELETE_ACCOUNT,
                ACTION,
            )
            .await?;

        if self.state.identity.username() == creds.username {
            tracing::info!(username = %creds.username, "Account deleted");
            self.state.sign_out();
        } else {
            tracing::warn!(username = %creds.username, "Account deleted after the session moved on");
        }
        Ok(Navigation::to(View::Home))
    }

    /// Rename the current user. The server issues a new token for the new name.
    pub async fn change_username(&self, new_username: &str) -> PeerlinkResult<()> {
        const ACTION: &str = "change your username";
        let creds = self.credentials(ACTION)?;
        if let Err(e) = validate_new_username(new_username) {
            return self.reject(e);
        }

        let body = encode(&UsernameChangeRequest { new_username })?;
        let response: UsernameChangeResponse = self
            .authorized(
                &creds,
                Endpoint::ChangeUsername {
                    username: creds.username.clone(),
                },
                Some(body),
                &messages::CHANGE_USERNAME,
                ACTION,
            )
            .await?;

        let patch = IdentityPatch {
            username: Some(response.username.unwrap_or_else(|| new_username.to_string())),
            access_token: Some(response.access_token),
            ..IdentityPatch::default()
        };
        if self.state.identity.merge_for(&creds.username, patch) {
            tracing::info!(from = %creds.username, to = %new_username, "Username changed");
        }
        Ok(())
    }

    pub async fn change_bio(&self, bio: &str) -> PeerlinkResult<()> {
        const ACTION: &str = "change your bio";
        let creds = self.credentials(ACTION)?;
        if let Err(e) = validate_bio(bio) {
            return self.reject(e);
        }

        let body = encode(&BioRequest { bio })?;
        let _: Acknowledgement = self
            .authorized(
                &creds,
                Endpoint::SetBio {
                    username: creds.username.clone(),
                },
                Some(body),
                &messages::CHANGE_BIO,
                ACTION,
            )
            .await?;

        self.state
            .identity
            .merge_for(&creds.username, IdentityPatch::bio(bio));
        Ok(())
    }

    pub async fn delete_bio(&self) -> PeerlinkResult<()> {
        const ACTION: &str = "delete your bio";
        let creds = self.credentials(ACTION)?;

        let _: Acknowledgement = self
            .authorized(
                &creds,
                Endpoint::DeleteBio {
                    username: creds.username.clone(),
                },
                None,
                &messages::DELETE_BIO,
                ACTION,
            )
            .await?;

        self.state
            .identity
            .merge_for(&creds.username, IdentityPatch::bio(""));
        Ok(())
    }

    /// Change the password. Nothing client-side changes on success.
    pub async fn change_password(&self, new_password: &str) -> PeerlinkResult<()> {
        const ACTION: &str = "change your password";
        let creds = self.credentials(ACTION)?;
        if let Err(e) = validate_new_password(new_password) {
            return self.reject(e);
        }

        let body = encode(&PasswordChangeRequest { new_password })?;
        let _: Acknowledgement = self
            .authorized(
                &creds,
                Endpoint::ChangePassword {
                    username: creds.username.clone(),
                },
                Some(body),
                &messages::CHANGE_PASSWORD,
                ACTION,
            )
            .await?;
        Ok(())
    }

    /// Refresh the current user's bio from the server.
    pub async fn fetch_bio(&self) -> PeerlinkResult<Option<String>> {
        let creds = self.credentials("view your bio")?;

        let response: BioResponse = self
            .public(
                Endpoint::GetBio {
                    username: creds.username.clone(),
                },
                None,
                &messages::GET_BIO,
            )
            .await?;

        let bio = response.bio.unwrap_or_default();
        self.state
            .identity
            .merge_for(&creds.username, IdentityPatch::bio(bio.clone()));
        Ok(Some(bio).filter(|b| !b.is_empty()))
    }

    /// Look up any user's public profile. The stores are not touched.
    pub async fn fetch_user(&self, username: &str) -> PeerlinkResult<UserProfile> {
        if username.trim().is_empty() {
            return self.reject(ValidationError::EmptyUsername);
        }
        self.public(
            Endpoint::User {
                username: username.trim().to_string(),
            },
            None,
            &messages::USER_PROFILE,
        )
        .await
    }
}
