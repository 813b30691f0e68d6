//! Request and response bodies for each endpoint.
//!
//! Response structs only name the fields the client reads; unknown fields
//! are ignored. A missing required field is a schema mismatch.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::state::{FollowRef, Identity};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsernameChangeRequest<'a> {
    #[serde(rename = "newUsername")]
    pub new_username: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BioRequest<'a> {
    pub bio: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChangeRequest<'a> {
    #[serde(rename = "newPassword")]
    pub new_password: &'a str,
}

/// Body of a successful login or registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub username: String,
    pub access_token: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date_joined: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl AuthResponse {
    /// The identity established by this response. Follow lists start
    /// unfetched.
    pub fn into_identity(self) -> Identity {
        Identity {
            user_id: self.user_id.unwrap_or_default(),
            username: self.username,
            email: self.email,
            date_joined: self.date_joined,
            access_token: Some(self.access_token),
            bio: self.bio,
            followers: None,
            following: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsernameChangeResponse {
    pub access_token: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BioResponse {
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowersResponse {
    pub followers: Vec<FollowRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowingResponse {
    pub following: Vec<FollowRef>,
}

/// Body of a successful follow or unfollow: the caller's new following list.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub following: Vec<FollowRef>,
}

/// One user in a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub users: Vec<SearchHit>,
}

/// Public profile of any user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Any JSON object; used where only the status matters.
#[derive(Debug, Clone, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}

/// Accepts a string or a number for ID fields.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
