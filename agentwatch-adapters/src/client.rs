//! Reporting backend client over HTTP.
//!
//! Every request is a GET on one of the five module paths with the access
//! token in the `X-ACCESS-TOKEN` header and the source's fixed query string.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use agentwatch_adapters::{ReportingClient, ReportingSource};
//! use agentwatch_types::{Credential, Source};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ReportingClient::builder()
//!         .base_url("https://reporting.example.com")
//!         .timeout(Duration::from_secs(15))
//!         .build()?;
//!
//!     let credential = Credential::new("token").ok_or("empty token")?;
//!     let queue = client.fetch(Source::QueueCounter, &credential).await?;
//!     println!("In queue: {}", queue["BothInQueue"]);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, REFERER, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use agentwatch_types::{Credential, Source};

use crate::endpoint::{self, Endpoints};
use crate::{FetchError, ReportingSource};

/// Header carrying the access token.
pub const TOKEN_HEADER: &str = "X-ACCESS-TOKEN";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

/// HTTP client for the reporting backend.
#[derive(Debug, Clone)]
pub struct ReportingClient {
    client: Client,
    base_url: String,
    endpoints: Endpoints,
}

impl ReportingClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> ReportingClientBuilder {
        ReportingClientBuilder::default()
    }

    /// The host all module paths are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, source: Source, credential: &Credential) -> Result<Value, FetchError> {
        let url = self.endpoints.url(&self.base_url, source);
        debug!(source = %source, url = %url, "fetching");

        let response = self
            .client
            .get(&url)
            .query(endpoint::query(source))
            .header(TOKEN_HEADER, credential.expose())
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT, "*/*")
            .header(REFERER, endpoint::join(&self.base_url, endpoint::REFERER_PATH))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        open_envelope(&body)
    }
}

#[async_trait]
impl ReportingSource for ReportingClient {
    async fn fetch(&self, source: Source, credential: &Credential) -> Result<Value, FetchError> {
        self.get(source, credential).await
    }
}

/// Builder for ReportingClient.
#[derive(Debug, Default)]
pub struct ReportingClientBuilder {
    base_url: Option<String>,
    endpoints: Endpoints,
    timeout: Option<Duration>,
}

impl ReportingClientBuilder {
    /// Set the backend host (default: the production reporting host).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the module path for one source.
    pub fn endpoint(mut self, source: Source, path: impl Into<String>) -> Self {
        self.endpoints.set(source, path);
        self
    }

    /// Set the request timeout (default: 15 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ReportingClient, FetchError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(15));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(ReportingClient {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| endpoint::DEFAULT_BASE_URL.to_string()),
            endpoints: self.endpoints,
        })
    }
}

/// The JSON envelope wrapping every response.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

// Validate a 200 body and return its `data` (null when absent).
fn open_envelope(body: &str) -> Result<Value, FetchError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let succeeded = envelope
        .status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("success"));
    if !succeeded {
        return Err(FetchError::Unsuccessful(
            envelope
                .message
                .unwrap_or_else(|| "Unknown error".to_string()),
        ));
    }

    Ok(envelope.data.unwrap_or(Value::Null))
}

// Prefer the backend's own message when a non-200 body is a JSON envelope.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Envelope>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| format!("Server returned status code {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credential() -> Credential {
        Credential::new("tok-123").unwrap()
    }

    async fn client_for(server: &MockServer) -> ReportingClient {
        ReportingClient::builder()
            .base_url(server.uri())
            .endpoint(Source::Roster, "/roster")
            .endpoint(Source::QueueCounter, "/queue")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let client = ReportingClient::builder().build().unwrap();
        assert_eq!(client.base_url(), endpoint::DEFAULT_BASE_URL);
        assert_eq!(
            client.endpoints.path(Source::Roster),
            endpoint::default_path(Source::Roster)
        );
    }

    #[test]
    fn test_open_envelope() {
        let data = open_envelope(r#"{"status":"SUCCESS","data":{"x":1}}"#).unwrap();
        assert_eq!(data, json!({"x": 1}));

        let data = open_envelope(r#"{"status":"success"}"#).unwrap();
        assert_eq!(data, Value::Null);

        let err = open_envelope(r#"{"status":"error","message":"Token expired"}"#).unwrap_err();
        assert_eq!(err, FetchError::Unsuccessful("Token expired".to_string()));

        let err = open_envelope(r#"{"data":{}}"#).unwrap_err();
        assert_eq!(err, FetchError::Unsuccessful("Unknown error".to_string()));

        let err = open_envelope("<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_sends_token_and_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/queue"))
            .and(header(TOKEN_HEADER, "tok-123"))
            .and(header("accept", "*/*"))
            .and(query_param("isAutoRefresh", "true"))
            .and(query_param("isFirstLoad", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "BothInQueue": 4 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let data = client
            .fetch(Source::QueueCounter, &credential())
            .await
            .unwrap();
        assert_eq!(data["BothInQueue"], 4);
    }

    #[tokio::test]
    async fn test_non_200_uses_backend_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/queue"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": "error",
                "message": "Invalid access token"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .fetch(Source::QueueCounter, &credential())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                status: 401,
                message: "Invalid access token".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_non_200_without_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/queue"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .fetch(Source::QueueCounter, &credential())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP 502: Server returned status code 502"
        );
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/queue"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "success", "data": {} }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = ReportingClient::builder()
            .base_url(server.uri())
            .endpoint(Source::QueueCounter, "/queue")
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();

        let err = client
            .fetch(Source::QueueCounter, &credential())
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Timeout);
    }

    #[tokio::test]
    async fn test_verify_accepts_roster() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/roster"))
            .and(query_param("useMetrics", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "RowValues": [] }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.verify(&credential()).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_accepts_oddly_typed_rows() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/roster"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "RowValues": [
                    { "Group": { "groupName": "ann" }, "Duration": "00:00:05" },
                    { "Group": { "groupName": "bob" }, "Duration": 5 }
                ]}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.verify(&credential()).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_rejects_missing_rows() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/roster"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": {}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.verify(&credential()).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::Unsuccessful("Invalid token response. Please try again.".to_string())
        );
    }

    #[tokio::test]
    async fn test_verify_rejects_non_array_rows() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/roster"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "RowValues": "none" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.verify(&credential()).await.is_err());
    }
}
