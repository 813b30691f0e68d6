//! Classification of a finished (or failed) request.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ErrorCategory;
use crate::traits::{HttpError, Response};

/// The five ways a gateway call can end.
///
/// Every call site matches on all of them; there is no "other" escape
/// hatch besides [`Outcome::UnexpectedStatus`].
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Status 200.
    Success { status: u16, body: Value },
    /// Status 400, 401, 403 or 404.
    ClientError { status: u16, body: Value },
    /// Status 500.
    ServerError { status: u16, body: Value },
    /// Any other status, including 2xx other than 200.
    UnexpectedStatus { status: u16, body: Value },
    /// The request could not complete.
    NetworkFailure(HttpError),
}

/// Discriminant of [`Outcome`], handy for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    ClientError,
    ServerError,
    UnexpectedStatus,
    NetworkFailure,
}

impl Outcome {
    /// Classify the result of an [`HttpClient`](crate::traits::HttpClient) call.
    pub fn classify(result: Result<Response, HttpError>) -> Self {
        match result {
            Ok(response) => Self::from_response(&response),
            Err(err) => Outcome::NetworkFailure(err),
        }
    }

    /// Classify a response by status code.
    ///
    /// The body is parsed as JSON; an empty or non-JSON body becomes
    /// `Value::Null`.
    pub fn from_response(response: &Response) -> Self {
        let status = response.status;
        let body = parse_body(response);
        match status {
            200 => Outcome::Success { status, body },
            400 | 401 | 403 | 404 => Outcome::ClientError { status, body },
            500 => Outcome::ServerError { status, body },
            _ => Outcome::UnexpectedStatus { status, body },
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Success { .. } => OutcomeKind::Success,
            Outcome::ClientError { .. } => OutcomeKind::ClientError,
            Outcome::ServerError { .. } => OutcomeKind::ServerError,
            Outcome::UnexpectedStatus { .. } => OutcomeKind::UnexpectedStatus,
            Outcome::NetworkFailure(_) => OutcomeKind::NetworkFailure,
        }
    }

    /// Status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Success { status, .. }
            | Outcome::ClientError { status, .. }
            | Outcome::ServerError { status, .. }
            | Outcome::UnexpectedStatus { status, .. } => Some(*status),
            Outcome::NetworkFailure(_) => None,
        }
    }

    /// Parsed body, if the server answered.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Outcome::Success { body, .. }
            | Outcome::ClientError { body, .. }
            | Outcome::ServerError { body, .. }
            | Outcome::UnexpectedStatus { body, .. } => Some(body),
            Outcome::NetworkFailure(_) => None,
        }
    }

    /// The `message` field the API puts on most responses.
    pub fn server_message(&self) -> Option<&str> {
        self.body()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
    }

    /// Error category for a non-success outcome.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::ClientError { status, .. }
            | Outcome::ServerError { status, .. }
            | Outcome::UnexpectedStatus { status, .. } => Some(ErrorCategory::from_status(*status)),
            Outcome::NetworkFailure(_) => Some(ErrorCategory::Network),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Deserialize a success body into an endpoint schema.
    pub fn parse<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        match self {
            Outcome::Success { body, .. } => Some(serde_json::from_value(body.clone())),
            _ => None,
        }
    }
}

fn parse_body(response: &Response) -> Value {
    if response.body.is_empty() {
        return Value::Null;
    }
    match serde_json::from_slice(&response.body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(status = response.status, "Response body is not JSON: {}", e);
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(status: u16) -> Outcome {
        Outcome::classify(Ok(Response::from_json(status, &json!({"message": "m"}))))
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(outcome(200).kind(), OutcomeKind::Success);
        for status in [400, 401, 403, 404] {
            assert_eq!(outcome(status).kind(), OutcomeKind::ClientError, "{}", status);
        }
        assert_eq!(outcome(500).kind(), OutcomeKind::ServerError);
        for status in [201, 204, 302, 409, 418, 502, 503] {
            assert_eq!(outcome(status).kind(), OutcomeKind::UnexpectedStatus, "{}", status);
        }
    }

    #[test]
    fn test_network_failure() {
        let outcome = Outcome::classify(Err(HttpError::ConnectionFailed("refused".into())));
        assert_eq!(outcome.kind(), OutcomeKind::NetworkFailure);
        assert_eq!(outcome.status(), None);
        assert_eq!(outcome.category(), Some(ErrorCategory::Network));
    }

    #[test]
    fn test_non_json_body_is_null() {
        let outcome = Outcome::classify(Ok(Response::new(500, "<html>oops</html>")));
        assert_eq!(outcome.body(), Some(&Value::Null));
        assert_eq!(outcome.server_message(), None);
    }

    #[test]
    fn test_server_message() {
        assert_eq!(outcome(400).server_message(), Some("m"));
    }

    #[test]
    fn test_parse_only_on_success() {
        #[derive(serde::Deserialize)]
        struct Msg {
            message: String,
        }
        let parsed = outcome(200).parse::<Msg>().unwrap().unwrap();
        assert_eq!(parsed.message, "m");
        assert!(outcome(404).parse::<Msg>().is_none());
    }
}
