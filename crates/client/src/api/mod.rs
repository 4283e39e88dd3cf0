//! Backend REST API client.
//!
//! Every request goes through [`ApiClient::call`], which attaches the host
//! session token and turns any non-success outcome into a [`RequestError`]
//! carrying a human-readable message. Endpoint wrappers live in the
//! submodules and only add typing on top of `call`.
//!
//! # Example
//!
//! ```rust,ignore
//! use teezy_client::api::ApiClient;
//!
//! let api = ApiClient::new(&config.api_base, host.clone());
//! let menu = api.menu().await?;
//! let balance = api.loyalty_balance().await?;
//! ```

mod loyalty;
mod menu;
mod orders;
mod promotions;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::ACCEPT;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::host::HostPlatform;

/// Header carrying the host platform's session token.
pub const AUTH_HEADER: &str = "X-Telegram-Init-Data";

/// A failed backend request.
///
/// Displays as its message alone so callers can show it verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestError {
    /// HTTP status, absent when the request never got a response.
    pub status: Option<u16>,
    /// Message suitable for the user.
    pub message: String,
}

impl RequestError {
    /// Error for a non-success response, using the body's `detail` when present.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        Self {
            status: Some(status),
            message: detail_message(body).unwrap_or_else(|| format!("HTTP {status}")),
        }
    }

    fn transport(err: &reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            message: format!("Network error: {err}"),
        }
    }

    fn invalid_body(status: u16, err: &serde_json::Error) -> Self {
        Self {
            status: Some(status),
            message: format!("Invalid response from server: {err}"),
        }
    }
}

/// Extract the message from a `{"detail": ...}` error body.
///
/// A string detail is used as-is; a list of validation entries is joined
/// from their `msg` fields.
fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

/// Client for the ordering backend.
///
/// Cheap to clone; clones share the HTTP connection pool and host handle.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    /// Base URL without a trailing slash; endpoints start with `/`.
    base_url: String,
    host: Arc<dyn HostPlatform>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: &Url, host: Arc<dyn HostPlatform>) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.as_str().trim_end_matches('/').to_string(),
                host,
            }),
        }
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Send a request and return the parsed JSON body.
    ///
    /// The session token is attached when the host has one; otherwise the
    /// request goes out without it and the backend decides.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` on transport failure, on any non-success
    /// status, or when a success body is not valid JSON.
    #[instrument(skip_all, fields(method = %method, endpoint = %endpoint))]
    pub async fn call(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, RequestError> {
        let url = format!("{}{endpoint}", self.inner.base_url);

        let mut request = self
            .inner
            .client
            .request(method, &url)
            .header(ACCEPT, "application/json");

        match self.inner.host.session_token() {
            Some(token) => request = request.header(AUTH_HEADER, token.expose_secret()),
            None => warn!("No host session token available, sending request without it"),
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request failed before a response arrived");
            RequestError::transport(&e)
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RequestError::transport(&e))?;

        if !status.is_success() {
            let err = RequestError::from_response(status.as_u16(), &text);
            warn!(
                status = %status,
                detail = %err.message,
                "API returned non-success status"
            );
            return Err(err);
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value = serde_json::from_str(&text).map_err(|e| {
            warn!(
                error = %e,
                body = %text.chars().take(200).collect::<String>(),
                "Failed to parse API response"
            );
            RequestError::invalid_body(status.as_u16(), &e)
        })?;

        debug!(status = %status, "API call succeeded");
        Ok(value)
    }

    /// `GET` an endpoint and deserialize the body.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the call fails or the body has the wrong shape.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, RequestError> {
        let value = self.call(endpoint, Method::GET, None).await?;
        decode(value)
    }

    /// `POST` a JSON body to an endpoint and deserialize the response.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the body cannot be encoded, the call fails,
    /// or the response has the wrong shape.
    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| RequestError {
            status: None,
            message: format!("Could not encode request: {e}"),
        })?;
        let value = self.call(endpoint, Method::POST, Some(&body)).await?;
        decode(value)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RequestError> {
    serde_json::from_value(value).map_err(|e| RequestError {
        status: None,
        message: format!("Unexpected response from server: {e}"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;
    use crate::host::StaticHost;

    fn client(server: &MockServer, token: Option<&str>) -> ApiClient {
        let host = StaticHost::new(token.map(|t| SecretString::from(t.to_string())));
        let base = Url::parse(&format!("{}/api", server.uri())).unwrap();
        ApiClient::new(&base, Arc::new(host))
    }

    #[tokio::test]
    async fn test_call_attaches_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/loyalty/balance"))
            .and(header(AUTH_HEADER, "user=1&hash=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"points": 12})))
            .expect(1)
            .mount(&server)
            .await;

        let value = client(&server, Some("user=1&hash=abc"))
            .call("/loyalty/balance", Method::GET, None)
            .await
            .unwrap();

        assert_eq!(value, json!({"points": 12}));
    }

    #[tokio::test]
    async fn test_call_without_token_omits_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/menu/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        client(&server, None)
            .call("/menu/", Method::GET, None)
            .await
            .unwrap();

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key(AUTH_HEADER));
    }

    #[tokio::test]
    async fn test_call_posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/orders/"))
            .and(body_json(json!({"items": []})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let value = client(&server, Some("t"))
            .call("/orders/", Method::POST, Some(&json!({"items": []})))
            .await
            .unwrap();

        assert_eq!(value["id"], 1);
    }

    #[tokio::test]
    async fn test_error_detail_is_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/orders/"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"detail": "Promo code expired"})),
            )
            .mount(&server)
            .await;

        let err = client(&server, Some("t"))
            .call("/orders/", Method::POST, Some(&json!({})))
            .await
            .unwrap_err();

        assert_eq!(err.status, Some(400));
        assert_eq!(err.to_string(), "Promo code expired");
    }

    #[tokio::test]
    async fn test_error_without_body_uses_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/menu/"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = client(&server, None)
            .call("/menu/", Method::GET, None)
            .await
            .unwrap_err();

        assert_eq!(err.status, Some(502));
        assert_eq!(err.message, "HTTP 502");
    }

    #[tokio::test]
    async fn test_invalid_success_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/menu/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[{\"id\": 1,"))
            .mount(&server)
            .await;

        let err = client(&server, None)
            .call("/menu/", Method::GET, None)
            .await
            .unwrap_err();

        assert_eq!(err.status, Some(200));
        assert!(err.message.starts_with("Invalid response from server"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let server = MockServer::start().await;
        let api = client(&server, None);
        drop(server);

        let err = api.call("/menu/", Method::GET, None).await.unwrap_err();
        assert!(err.status.is_none());
        assert!(err.message.starts_with("Network error"));
    }

    #[test]
    fn test_detail_message_validation_list() {
        let body = r#"{"detail": [{"loc": ["body", "pickup_time"], "msg": "field required"},
                                  {"loc": ["body", "store_id"], "msg": "value is not a valid integer"}]}"#;
        assert_eq!(
            detail_message(body).unwrap(),
            "field required; value is not a valid integer"
        );
    }

    #[test]
    fn test_detail_message_missing() {
        assert!(detail_message("{}").is_none());
        assert!(detail_message("not json").is_none());
        assert!(detail_message(r#"{"detail": 5}"#).is_none());
    }
}
