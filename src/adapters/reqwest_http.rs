//! Production transport on top of reqwest.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::traits::{Headers, HttpClient, HttpError, Method, Request, Response};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("peerlink/", env!("CARGO_PKG_VERSION"));

/// [`HttpClient`] backed by a pooled `reqwest::Client`.
///
/// Clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Client with reqwest's defaults and no timeout.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, HttpError> {
        Self::with_timeout(config.request_timeout)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map(Self::with_client)
            .map_err(|e| HttpError::Other(e.to_string()))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Sort a reqwest failure into the transport error kinds.
fn transport_error(err: reqwest::Error) -> HttpError {
    let detail = err.to_string();
    if err.is_timeout() {
        HttpError::Timeout(detail)
    } else if err.is_connect() {
        HttpError::ConnectionFailed(detail)
    } else if err.is_builder() {
        HttpError::InvalidUrl(detail)
    } else {
        HttpError::Other(detail)
    }
}

/// Response headers with non-UTF-8 values dropped.
fn collect_headers(map: &reqwest::header::HeaderMap) -> Headers {
    map.iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: Request) -> Result<Response, HttpError> {
        let Request {
            method,
            url,
            headers,
            body,
        } = request;

        let builder = headers.iter().fold(
            self.client.request(reqwest_method(method), url.as_str()),
            |builder, (name, value)| builder.header(name.as_str(), value.as_str()),
        );
        let builder = match body {
            Some(body) => builder.body(body),
            None => builder,
        };

        let reply = builder.send().await.map_err(transport_error)?;
        let status = reply.status().as_u16();
        let headers = collect_headers(reply.headers());
        let body = reply.bytes().await.map_err(transport_error)?;

        Ok(Response::with_headers(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("peerlink/"));
        let client = ReqwestHttpClient::with_timeout(Duration::from_secs(2)).unwrap();
        let _ = client.inner();
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(reqwest_method(Method::Get), reqwest::Method::GET);
        assert_eq!(reqwest_method(Method::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn test_collect_headers() {
        let mut map = reqwest::header::HeaderMap::new();
        map.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let headers = collect_headers(&map);
        assert_eq!(
            headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_malformed_url_fails_before_sending() {
        let client = ReqwestHttpClient::new();
        let result = client
            .execute(Request::new(Method::Get, "not a url"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_closed_port_is_a_transport_error() {
        let client = ReqwestHttpClient::with_timeout(Duration::from_secs(2)).unwrap();
        let result = client
            .execute(Request::new(Method::Delete, "http://127.0.0.1:9/api/users/a"))
            .await;
        assert!(matches!(
            result,
            Err(HttpError::ConnectionFailed(_)) | Err(HttpError::Timeout(_)) | Err(HttpError::Other(_))
        ));
    }
}
