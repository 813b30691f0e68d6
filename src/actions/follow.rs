use super::{Actions, Credentials};
use crate::error::{PeerlinkResult, ValidationError};
use crate::gateway::schema::FollowResponse;
use crate::gateway::{messages, Endpoint, MessageTable};
use crate::state::{FollowRef, IdentityPatch};
use crate::traits::HttpClient;

impl<C: HttpClient> Actions<C> {
    /// Follow `target`. On success the following list becomes the one the
    /// server returns.
    pub async fn follow(&self, target: &str) -> PeerlinkResult<Vec<FollowRef>> {
        const ACTION: &str = "follow users";
        let creds = self.credentials(ACTION)?;
        let target = self.check_target(target)?;
        if target == creds.username {
            return self.reject(ValidationError::SelfFollow);
        }

        self.toggle(
            &creds,
            Endpoint::Follow { username: target },
            &messages::FOLLOW,
            ACTION,
        )
        .await
    }

    /// Stop following `target`.
    pub async fn unfollow(&self, target: &str) -> PeerlinkResult<Vec<FollowRef>> {
        const ACTION: &str = "unfollow users";
        let creds = self.credentials(ACTION)?;
        let target = self.check_target(target)?;

        self.toggle(
            &creds,
            Endpoint::Unfollow { username: target },
            &messages::UNFOLLOW,
            ACTION,
        )
        .await
    }

    fn check_target(&self, target: &str) -> PeerlinkResult<String> {
        let target = target.trim();
        if target.is_empty() {
            return self.reject(ValidationError::EmptyUsername);
        }
        Ok(target.to_string())
    }

    async fn toggle(
        &self,
        creds: &Credentials,
        endpoint: Endpoint,
        table: &MessageTable,
        action: &'static str,
    ) -> PeerlinkResult<Vec<FollowRef>> {
        let response: FollowResponse = self
            .authorized(creds, endpoint, None, table, action)
            .await?;

        tracing::debug!(
            username = %creds.username,
            count = response.following.len(),
            "Following list replaced"
        );
        self.state.identity.merge_for(
            &creds.username,
            IdentityPatch::following(response.following.clone()),
        );
        Ok(response.following)
    }
}
