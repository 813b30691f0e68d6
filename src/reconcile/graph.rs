//! Followers/following reconciliation for the profile and dashboard views.

use std::sync::Arc;

use tokio::sync::watch;

use super::{Generation, Ticket, ViewPhase};
use crate::error::{PeerlinkError, PeerlinkResult};
use crate::gate::{guard, GateDecision, View};
use crate::gateway::schema::{FollowersResponse, FollowingResponse};
use crate::gateway::{messages, settle, Endpoint, Gateway};
use crate::state::{AppState, IdentityPatch};
use crate::traits::HttpClient;

/// The two lists a graph view loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowList {
    Followers,
    Following,
}

impl FollowList {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowList::Followers => "followers",
            FollowList::Following => "following",
        }
    }

    fn endpoint(&self, username: &str) -> Endpoint {
        let username = username.to_string();
        match self {
            FollowList::Followers => Endpoint::Followers { username },
            FollowList::Following => Endpoint::Following { username },
        }
    }
}

/// Observable state of a graph view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSnapshot {
    pub phase: ViewPhase,
    /// True from the start of the fetches until both have resolved.
    pub loading: bool,
    /// Username the current mount loads for.
    pub key: Option<String>,
}

/// A view that shows the current user's followers and following.
///
/// Both lists are fetched concurrently on mount and merged into the
/// identity store independently, so one failing does not hold back the
/// other. Clones share the same mount generation and snapshot.
pub struct GraphView<C: HttpClient> {
    view: View,
    gateway: Gateway<C>,
    state: AppState,
    generation: Generation,
    status: Arc<watch::Sender<GraphSnapshot>>,
    attached: Arc<watch::Sender<bool>>,
}

impl<C: HttpClient> Clone for GraphView<C> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            gateway: self.gateway.clone(),
            state: self.state.clone(),
            generation: self.generation.clone(),
            status: Arc::clone(&self.status),
            attached: Arc::clone(&self.attached),
        }
    }
}

impl<C: HttpClient> GraphView<C> {
    pub fn new(view: View, gateway: Gateway<C>, state: AppState) -> Self {
        let (status, _) = watch::channel(GraphSnapshot::default());
        let (attached, _) = watch::channel(false);
        Self {
            view,
            gateway,
            state,
            generation: Generation::new(),
            status: Arc::new(status),
            attached: Arc::new(attached),
        }
    }

    pub fn profile(gateway: Gateway<C>, state: AppState) -> Self {
        Self::new(View::Profile, gateway, state)
    }

    pub fn dashboard(gateway: Gateway<C>, state: AppState) -> Self {
        Self::new(View::Dashboard, gateway, state)
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GraphSnapshot> {
        self.status.subscribe()
    }

    /// Run the gate and, if allowed, load both lists.
    ///
    /// Returns the phase this mount reached. A mount that was superseded
    /// before finishing returns whatever phase the newer mount has set.
    pub async fn mount(&self) -> ViewPhase {
        let ticket = self.generation.begin();
        self.status.send_replace(GraphSnapshot::default());

        if let GateDecision::RedirectTo(target) =
            guard(self.view, self.state.session.is_logged_in())
        {
            self.update(&ticket, |s| s.phase = ViewPhase::Redirected(target));
            return self.snapshot().phase;
        }

        let username = self.state.identity.username();
        if username.is_empty() {
            tracing::warn!(view = %self.view, "Logged in without a username; nothing to load");
            self.update(&ticket, |s| s.phase = ViewPhase::Loaded);
            return self.snapshot().phase;
        }

        self.update(&ticket, |s| {
            s.phase = ViewPhase::Loading;
            s.loading = true;
            s.key = Some(username.clone());
        });
        tracing::debug!(view = %self.view, username = %username, "Loading follow lists");

        let (followers, following) = tokio::join!(
            self.load(&ticket, &username, FollowList::Followers),
            self.load(&ticket, &username, FollowList::Following),
        );
        tracing::debug!(
            view = %self.view,
            followers = followers.is_ok(),
            following = following.is_ok(),
            "Follow lists resolved"
        );

        if let Some(phase) = self.revoke_if_signed_out(&ticket) {
            return phase;
        }
        self.update(&ticket, |s| {
            s.loading = false;
            s.phase = ViewPhase::Loaded;
        });
        self.snapshot().phase
    }

    /// Detach the view. Pending results are discarded and [`GraphView::run`]
    /// returns.
    pub fn unmount(&self) {
        self.generation.invalidate();
        self.attached.send_replace(false);
        self.status.send_replace(GraphSnapshot::default());
        tracing::debug!(view = %self.view, "Unmounted");
    }

    /// Mount, then remount whenever the session flag or the username
    /// changes, until [`GraphView::unmount`] is called.
    pub async fn run(&self) {
        let mut attached_rx = self.attached.subscribe();
        let mut session_rx = self.state.session.subscribe();
        let mut identity_rx = self.state.identity.subscribe();
        self.attached.send_replace(true);
        attached_rx.borrow_and_update();
        session_rx.borrow_and_update();
        let mut key = identity_rx.borrow_and_update().username.clone();

        self.mount().await;

        loop {
            tokio::select! {
                changed = attached_rx.changed() => {
                    if changed.is_err() || !*attached_rx.borrow_and_update() {
                        break;
                    }
                }
                changed = session_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    session_rx.borrow_and_update();
                    key = self.state.identity.username();
                    self.mount().await;
                }
                changed = identity_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let next = identity_rx.borrow_and_update().username.clone();
                    if next != key {
                        tracing::debug!(view = %self.view, from = %key, to = %next, "Identity key changed");
                        key = next;
                        self.mount().await;
                    }
                }
            }
        }
    }

    fn update(&self, ticket: &Ticket, apply: impl FnOnce(&mut GraphSnapshot)) {
        self.status.send_if_modified(|snapshot| {
            if !ticket.is_current() {
                return false;
            }
            apply(snapshot);
            true
        });
    }

    /// Redirect this mount if the session ended while its fetches were in
    /// flight. Returns the phase to report, or `None` if still signed in.
    fn revoke_if_signed_out(&self, ticket: &Ticket) -> Option<ViewPhase> {
        let GateDecision::RedirectTo(target) =
            guard(self.view, self.state.session.is_logged_in())
        else {
            return None;
        };
        if ticket.is_current() {
            tracing::warn!(view = %self.view, "Session ended during load; redirecting");
            self.update(ticket, |s| {
                *s = GraphSnapshot {
                    phase: ViewPhase::Redirected(target),
                    ..GraphSnapshot::default()
                }
            });
            self.generation.invalidate();
        }
        Some(self.snapshot().phase)
    }

    fn is_stale(&self, ticket: &Ticket, username: &str) -> bool {
        !ticket.is_current()
            || !self.state.session.is_logged_in()
            || self.state.identity.username() != username
    }

    /// Fetch one list and merge it. Returns the number of entries merged.
    async fn load(&self, ticket: &Ticket, username: &str, list: FollowList) -> PeerlinkResult<usize> {
        let endpoint = list.endpoint(username);
        let outcome = self.gateway.request(&endpoint, None).await?;

        if self.is_stale(ticket, username) {
            tracing::warn!(view = %self.view, list = list.as_str(), "Discarding stale result");
            return Err(PeerlinkError::Superseded);
        }

        let sink = self.state.notifications.as_ref();
        let path = endpoint.path();
        let patch = match list {
            FollowList::Followers => {
                let response: FollowersResponse =
                    settle(outcome, &messages::FOLLOW_LIST, sink, &path)?;
                IdentityPatch::followers(response.followers)
            }
            FollowList::Following => {
                let response: FollowingResponse =
                    settle(outcome, &messages::FOLLOW_LIST, sink, &path)?;
                IdentityPatch::following(response.following)
            }
        };
        let count = patch
            .followers
            .as_ref()
            .or(patch.following.as_ref())
            .map_or(0, Vec::len);

        if !self.state.identity.merge_for(username, patch) {
            return Err(PeerlinkError::Superseded);
        }
        Ok(count)
    }
}
