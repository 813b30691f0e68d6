//! Recording HTTP double.
//!
//! Every request is kept for later inspection. Replies come from a route
//! table and can be held back on a [`Notify`] so tests control the order in
//! which concurrent calls complete.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

use crate::traits::{HttpClient, HttpError, Method, Request, Response};

/// What a route answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Any status, including error statuses
    Reply(Response),
    /// No HTTP status at all
    Error(HttpError),
    /// Park until `gate` fires, then answer with `then`
    Gated {
        gate: Arc<Notify>,
        then: Box<MockResponse>,
    },
}

impl MockResponse {
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Reply(Response::from_json(status, &value))
    }

    /// Wrap `then` so it is only delivered once the returned gate is
    /// notified.
    pub fn gated(then: MockResponse) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let held = MockResponse::Gated {
            gate: Arc::clone(&gate),
            then: Box::new(then),
        };
        (held, gate)
    }

    async fn resolve(self) -> Result<Response, HttpError> {
        let mut current = self;
        loop {
            current = match current {
                MockResponse::Reply(response) => return Ok(response),
                MockResponse::Error(err) => return Err(err),
                MockResponse::Gated { gate, then } => {
                    gate.notified().await;
                    *then
                }
            };
        }
    }
}

#[derive(Debug)]
struct Route {
    method: Option<Method>,
    url: String,
    response: MockResponse,
}

impl Route {
    /// Higher is more specific; `None` if the route does not apply.
    fn rank(&self, request: &Request) -> Option<(bool, bool, usize)> {
        if self.method.is_some_and(|m| m != request.method) {
            return None;
        }
        let exact = request.url == self.url;
        if !exact && !request.url.starts_with(&self.url) {
            return None;
        }
        Some((exact, self.method.is_some(), self.url.len()))
    }
}

#[derive(Debug, Default)]
struct MockState {
    routes: Vec<Route>,
    fallback: Option<MockResponse>,
    log: Vec<Request>,
}

impl MockState {
    fn install(&mut self, method: Option<Method>, url: &str, response: MockResponse) {
        self.routes.retain(|r| !(r.method == method && r.url == url));
        self.routes.push(Route {
            method,
            url: url.to_string(),
            response,
        });
    }

    fn answer_for(&self, request: &Request) -> Option<MockResponse> {
        self.routes
            .iter()
            .filter_map(|route| route.rank(request).map(|rank| (rank, route)))
            .max_by_key(|(rank, _)| *rank)
            .map(|(_, route)| route.response.clone())
            .or_else(|| self.fallback.clone())
    }
}

/// In-memory [`HttpClient`] for unit tests.
///
/// Routes match on an exact URL or a URL prefix, optionally restricted to
/// one method. Exact beats prefix, a method-specific route beats a generic
/// one, and among prefixes the longest wins. Unmatched requests get the
/// default response, or an [`HttpError::Other`] when none is set.
///
/// ```ignore
/// let http = MockHttpClient::new();
/// http.set_response(
///     "http://api/users/alice/followers",
///     MockResponse::json(200, serde_json::json!({"followers": []})),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Answer any method on `url` (or URLs it prefixes).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.state().install(None, url, response);
    }

    /// Answer only `method` on `url`.
    pub fn set_method_response(&self, method: Method, url: &str, response: MockResponse) {
        self.state().install(Some(method), url, response);
    }

    pub fn set_default_response(&self, response: MockResponse) {
        self.state().fallback = Some(response);
    }

    /// Requests seen so far, oldest first.
    pub fn get_requests(&self) -> Vec<Request> {
        self.state().log.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state().log.len()
    }

    pub fn clear_requests(&self) {
        self.state().log.clear();
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: Request) -> Result<Response, HttpError> {
        let answer = {
            let mut state = self.state();
            let answer = state.answer_for(&request);
            state.log.push(request.clone());
            answer
        };

        match answer {
            Some(response) => response.resolve().await,
            None => Err(HttpError::Other(format!(
                "no mock route for {} {}",
                request.method, request.url
            ))),
        }
    }
}
