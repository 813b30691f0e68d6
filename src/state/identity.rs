//! The current user's profile record and its store.
//!
//! [`IdentityStore`] is the single owner of the [`Identity`]. Writes are
//! either a full replace (login, register, clear) or a shallow merge of an
//! [`IdentityPatch`], which leaves every field the patch does not name
//! untouched.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Reference to another user inside a followers/following list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowRef {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl FollowRef {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }
}

/// The authenticated user's profile as held client-side.
///
/// `followers` and `following` are `None` until they have been fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub date_joined: String,
    pub access_token: Option<String>,
    pub bio: Option<String>,
    pub followers: Option<Vec<FollowRef>>,
    pub following: Option<Vec<FollowRef>>,
}

impl Identity {
    /// The all-empty identity written on logout and account deletion.
    ///
    /// The token is `None` rather than `Some("")`; [`Identity::access_token`]
    /// treats both as absent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True for the all-empty identity.
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// The bearer token, if one is present and non-empty.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Usernames of the fetched followers, empty if not fetched.
    pub fn follower_names(&self) -> Vec<&str> {
        names(self.followers.as_deref())
    }

    /// Usernames of the fetched following list, empty if not fetched.
    pub fn following_names(&self) -> Vec<&str> {
        names(self.following.as_deref())
    }

    /// Whether `username` is in the fetched following list.
    pub fn is_following(&self, username: &str) -> bool {
        self.following
            .as_deref()
            .is_some_and(|list| list.iter().any(|f| f.username == username))
    }

    /// Join date formatted like `1/5/24, 3:04:05 PM` (UTC), or
    /// `Invalid date` when the server value cannot be parsed.
    pub fn joined_display(&self) -> String {
        format_date(&self.date_joined)
    }

    /// Apply every field the patch carries, keeping the rest.
    pub fn merge(&mut self, patch: IdentityPatch) {
        let IdentityPatch {
            user_id,
            username,
            email,
            date_joined,
            access_token,
            bio,
            followers,
            following,
        } = patch;

        if let Some(v) = user_id {
            self.user_id = v;
        }
        if let Some(v) = username {
            self.username = v;
        }
        if let Some(v) = email {
            self.email = v;
        }
        if let Some(v) = date_joined {
            self.date_joined = v;
        }
        if let Some(v) = access_token {
            self.access_token = Some(v);
        }
        if let Some(v) = bio {
            self.bio = Some(v);
        }
        if let Some(v) = followers {
            self.followers = Some(v);
        }
        if let Some(v) = following {
            self.following = Some(v);
        }
    }
}

fn names(list: Option<&[FollowRef]>) -> Vec<&str> {
    list.unwrap_or_default()
        .iter()
        .map(|f| f.username.as_str())
        .collect()
}

/// Partial update for [`Identity::merge`]. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityPatch {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub date_joined: Option<String>,
    pub access_token: Option<String>,
    pub bio: Option<String>,
    pub followers: Option<Vec<FollowRef>>,
    pub following: Option<Vec<FollowRef>>,
}

impl IdentityPatch {
    pub fn followers(list: Vec<FollowRef>) -> Self {
        Self {
            followers: Some(list),
            ..Self::default()
        }
    }

    pub fn following(list: Vec<FollowRef>) -> Self {
        Self {
            following: Some(list),
            ..Self::default()
        }
    }

    pub fn bio(bio: impl Into<String>) -> Self {
        Self {
            bio: Some(bio.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Observable owner of the current [`Identity`].
///
/// Clones share the same underlying value; subscribers are woken on every
/// write.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    tx: Arc<watch::Sender<Identity>>,
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Identity::empty());
        Self { tx: Arc::new(tx) }
    }

    /// Copy of the current identity.
    pub fn snapshot(&self) -> Identity {
        self.tx.borrow().clone()
    }

    /// Current username without cloning the whole record.
    pub fn username(&self) -> String {
        self.tx.borrow().username.clone()
    }

    /// Replace the whole identity.
    pub fn set(&self, identity: Identity) {
        tracing::debug!(username = %identity.username, "Identity replaced");
        self.tx.send_replace(identity);
    }

    /// Shallow-merge a patch into the current identity.
    pub fn merge(&self, patch: IdentityPatch) {
        if patch.is_empty() {
            return;
        }
        self.tx.send_modify(|identity| identity.merge(patch));
    }

    /// Merge only while the identity still belongs to `username`.
    ///
    /// Returns false (and writes nothing) if the user changed or logged out
    /// since the request that produced `patch` was issued.
    pub fn merge_for(&self, username: &str, patch: IdentityPatch) -> bool {
        let mut applied = false;
        self.tx.send_if_modified(|identity| {
            if identity.username != username || identity.is_empty() {
                return false;
            }
            applied = true;
            if patch.is_empty() {
                return false;
            }
            identity.merge(patch);
            true
        });
        if !applied {
            tracing::debug!(expected = %username, "Dropped identity patch for stale user");
        }
        applied
    }

    /// Reset to the all-empty identity.
    pub fn clear(&self) {
        tracing::debug!("Identity cleared");
        self.tx.send_replace(Identity::empty());
    }

    /// Receiver that observes every subsequent write.
    pub fn subscribe(&self) -> watch::Receiver<Identity> {
        self.tx.subscribe()
    }
}

fn format_date(raw: &str) -> String {
    const INVALID: &str = "Invalid date";
    const FORMAT: &str = "%-m/%-d/%y, %-I:%M:%S %p";

    let raw = raw.trim();
    if raw.is_empty() {
        return INVALID.to_string();
    }

    let parsed: Option<DateTime<Utc>> = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
                .ok()
                .map(|naive| naive.and_utc())
        });

    match parsed {
        Some(dt) => dt.format(FORMAT).to_string(),
        None => INVALID.to_string(),
    }
}
