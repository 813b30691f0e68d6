//! User search reconciliation.

use std::sync::Arc;

use tokio::sync::watch;

use super::{Generation, Ticket, ViewPhase};
use crate::gate::{guard, GateDecision, View};
use crate::gateway::schema::{SearchHit, SearchResponse};
use crate::gateway::{messages, settle, Endpoint, Gateway};
use crate::notifications::NotificationSink;
use crate::state::AppState;
use crate::traits::HttpClient;

/// Observable state of the search view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSnapshot {
    pub phase: ViewPhase,
    pub loading: bool,
    pub query: String,
    /// Results for `query` only; never merged across queries.
    pub results: Vec<SearchHit>,
}

/// The search view. Each query supersedes the previous one; a response
/// for an older query is dropped.
pub struct SearchView<C: HttpClient> {
    gateway: Gateway<C>,
    state: AppState,
    generation: Generation,
    status: Arc<watch::Sender<SearchSnapshot>>,
}

impl<C: HttpClient> Clone for SearchView<C> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            state: self.state.clone(),
            generation: self.generation.clone(),
            status: Arc::clone(&self.status),
        }
    }
}

impl<C: HttpClient> SearchView<C> {
    pub fn new(gateway: Gateway<C>, state: AppState) -> Self {
        let (status, _) = watch::channel(SearchSnapshot::default());
        Self {
            gateway,
            state,
            generation: Generation::new(),
            status: Arc::new(status),
        }
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.status.borrow().clone()
    }

    pub fn results(&self) -> Vec<SearchHit> {
        self.status.borrow().results.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.status.subscribe()
    }

    /// Run `query` and replace the result set with its answer.
    ///
    /// A blank query does nothing. Failures leave an empty result set and
    /// one notification.
    pub async fn search(&self, query: &str) -> ViewPhase {
        if let GateDecision::RedirectTo(target) =
            guard(View::Search, self.state.session.is_logged_in())
        {
            self.generation.invalidate();
            self.status.send_replace(SearchSnapshot {
                phase: ViewPhase::Redirected(target),
                ..SearchSnapshot::default()
            });
            return ViewPhase::Redirected(target);
        }

        let query = query.trim();
        if query.is_empty() {
            return self.snapshot().phase;
        }

        let ticket = self.generation.begin();
        self.status.send_replace(SearchSnapshot {
            phase: ViewPhase::Loading,
            loading: true,
            query: query.to_string(),
            results: Vec::new(),
        });

        let endpoint = Endpoint::Search {
            query: query.to_string(),
        };
        let outcome = match self.gateway.request(&endpoint, None).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state.notifications.error(&e.to_string());
                self.update(&ticket, |s| {
                    s.loading = false;
                    s.phase = ViewPhase::Loaded;
                });
                return self.snapshot().phase;
            }
        };

        if !ticket.is_current() {
            tracing::warn!(query, "Discarding results for superseded query");
            return self.snapshot().phase;
        }
        if let GateDecision::RedirectTo(target) =
            guard(View::Search, self.state.session.is_logged_in())
        {
            tracing::warn!(query, "Session ended during search; redirecting");
            self.update(&ticket, |s| {
                *s = SearchSnapshot {
                    phase: ViewPhase::Redirected(target),
                    ..SearchSnapshot::default()
                }
            });
            self.generation.invalidate();
            return self.snapshot().phase;
        }

        let results = match settle::<SearchResponse>(
            outcome,
            &messages::SEARCH,
            self.state.notifications.as_ref(),
            &endpoint.path(),
        ) {
            Ok(response) => response.users,
            Err(_) => Vec::new(),
        };
        tracing::debug!(query, count = results.len(), "Search resolved");

        self.update(&ticket, |s| {
            s.results = results;
            s.loading = false;
            s.phase = ViewPhase::Loaded;
        });
        self.snapshot().phase
    }

    /// Detach the view and drop any pending response.
    pub fn unmount(&self) {
        self.generation.invalidate();
        self.status.send_replace(SearchSnapshot::default());
    }

    fn update(&self, ticket: &Ticket, apply: impl FnOnce(&mut SearchSnapshot)) {
        self.status.send_if_modified(|snapshot| {
            if !ticket.is_current() {
                return false;
            }
            apply(snapshot);
            true
        });
    }
}
