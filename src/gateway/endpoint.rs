//! The REST endpoints the client consumes.

use crate::traits::Method;

/// One API operation: method plus path, with path segments encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    User { username: String },
    DeleteUser { username: String },
    ChangeUsername { username: String },
    GetBio { username: String },
    SetBio { username: String },
    DeleteBio { username: String },
    ChangePassword { username: String },
    Followers { username: String },
    Following { username: String },
    Follow { username: String },
    Unfollow { username: String },
    Search { query: String },
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Login
            | Endpoint::Register
            | Endpoint::Follow { .. }
            | Endpoint::Unfollow { .. } => Method::Post,
            Endpoint::ChangeUsername { .. }
            | Endpoint::SetBio { .. }
            | Endpoint::ChangePassword { .. } => Method::Put,
            Endpoint::DeleteUser { .. } | Endpoint::DeleteBio { .. } => Method::Delete,
            Endpoint::User { .. }
            | Endpoint::GetBio { .. }
            | Endpoint::Followers { .. }
            | Endpoint::Following { .. }
            | Endpoint::Search { .. } => Method::Get,
        }
    }

    /// Path relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "/login".to_string(),
            Endpoint::Register => "/register".to_string(),
            Endpoint::User { username } | Endpoint::DeleteUser { username } => {
                format!("/users/{}", seg(username))
            }
            Endpoint::ChangeUsername { username } => format!("/users/{}/username", seg(username)),
            Endpoint::GetBio { username }
            | Endpoint::SetBio { username }
            | Endpoint::DeleteBio { username } => format!("/users/{}/bio", seg(username)),
            Endpoint::ChangePassword { username } => {
                format!("/users/{}/changePassword", seg(username))
            }
            Endpoint::Followers { username } => format!("/users/{}/followers", seg(username)),
            Endpoint::Following { username } => format!("/users/{}/following", seg(username)),
            Endpoint::Follow { username } => format!("/users/{}/follow", seg(username)),
            Endpoint::Unfollow { username } => format!("/users/{}/unfollow", seg(username)),
            Endpoint::Search { query } => format!("/users/search?q={}", seg(query)),
        }
    }

    /// Whether the API requires a bearer token for this endpoint.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Endpoint::DeleteUser { .. }
                | Endpoint::ChangeUsername { .. }
                | Endpoint::SetBio { .. }
                | Endpoint::DeleteBio { .. }
                | Endpoint::ChangePassword { .. }
                | Endpoint::Follow { .. }
                | Endpoint::Unfollow { .. }
        )
    }
}

fn seg(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn test_paths_and_methods() {
        let cases = [
            (Endpoint::Login, Method::Post, "/login"),
            (Endpoint::Register, Method::Post, "/register"),
            (Endpoint::DeleteUser { username: user("alice") }, Method::Delete, "/users/alice"),
            (
                Endpoint::ChangeUsername { username: user("alice") },
                Method::Put,
                "/users/alice/username",
            ),
            (Endpoint::SetBio { username: user("alice") }, Method::Put, "/users/alice/bio"),
            (Endpoint::DeleteBio { username: user("alice") }, Method::Delete, "/users/alice/bio"),
            (
                Endpoint::Followers { username: user("alice") },
                Method::Get,
                "/users/alice/followers",
            ),
            (
                Endpoint::Following { username: user("alice") },
                Method::Get,
                "/users/alice/following",
            ),
            (Endpoint::Follow { username: user("bob") }, Method::Post, "/users/bob/follow"),
            (Endpoint::Unfollow { username: user("bob") }, Method::Post, "/users/bob/unfollow"),
            (
                Endpoint::ChangePassword { username: user("alice") },
                Method::Put,
                "/users/alice/changePassword",
            ),
        ];
        for (endpoint, method, path) in cases {
            assert_eq!(endpoint.method(), method, "{:?}", endpoint);
            assert_eq!(endpoint.path(), path);
        }
    }

    #[test]
    fn test_search_query_is_encoded() {
        let endpoint = Endpoint::Search { query: "al ice&x".to_string() };
        assert_eq!(endpoint.path(), "/users/search?q=al%20ice%26x");
    }

    #[test]
    fn test_auth_requirements() {
        assert!(!Endpoint::Login.requires_auth());
        assert!(!Endpoint::Register.requires_auth());
        assert!(!Endpoint::Followers { username: user("a") }.requires_auth());
        assert!(Endpoint::DeleteUser { username: user("a") }.requires_auth());
        assert!(Endpoint::Follow { username: user("a") }.requires_auth());
    }
}
