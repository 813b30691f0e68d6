//! Which views need a session, and where to send the user when they lack one.

use std::fmt;

/// Every view the application routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    Register,
    Profile,
    Dashboard,
    Search,
    DeleteAccount,
    EditProfile,
    EditUsername,
    EditBio,
    Logout,
    NotFound,
}

impl View {
    pub const ALL: [View; 12] = [
        View::Home,
        View::Login,
        View::Register,
        View::Profile,
        View::Dashboard,
        View::Search,
        View::DeleteAccount,
        View::EditProfile,
        View::EditUsername,
        View::EditBio,
        View::Logout,
        View::NotFound,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::Login => "/login",
            View::Register => "/register",
            View::Profile => "/userinfo",
            View::Dashboard => "/dashboard",
            View::Search => "/search",
            View::DeleteAccount => "/deleteaccount",
            View::EditProfile => "/editprofile",
            View::EditUsername => "/editusername",
            View::EditBio => "/editbio",
            View::Logout => "/logout",
            View::NotFound => "*",
        }
    }

    /// Resolve a route path; anything unknown is [`View::NotFound`].
    pub fn from_path(path: &str) -> View {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        View::ALL
            .into_iter()
            .find(|v| *v != View::NotFound && v.path() == normalized)
            .unwrap_or(View::NotFound)
    }

    /// Views that render only for a logged-in user.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            View::Profile
                | View::Dashboard
                | View::Search
                | View::DeleteAccount
                | View::EditProfile
                | View::EditUsername
                | View::EditBio
                | View::Logout
        )
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectTo(View),
}

/// Where an unauthorized user lands.
pub const REDIRECT_TARGET: View = View::Home;

/// Decide synchronously whether `view` may render.
pub fn guard(view: View, is_logged_in: bool) -> GateDecision {
    if view.is_protected() && !is_logged_in {
        tracing::debug!(view = %view, "Gate redirect");
        GateDecision::RedirectTo(REDIRECT_TARGET)
    } else {
        GateDecision::Allow
    }
}

/// Where the router should go after an action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub to: View,
}

impl Navigation {
    pub fn to(view: View) -> Self {
        Self { to: view }
    }

    pub fn path(&self) -> &'static str {
        self.to.path()
    }
}
