//! Shared HTTP transport.
//!
//! Wraps a caller-configured `reqwest::Client` (timeouts, TLS and proxy are
//! set there) together with the tracing hook. Every request the client and
//! its services issue goes through [`Transport::execute`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Request, StatusCode, Version};
use serde::de::DeserializeOwned;

use crate::error::{Result, TeamCityError};
use crate::trace::{TraceConfig, TraceSink, Tracer};

const USER_AGENT: &str = concat!("teamcity-client/", env!("CARGO_PKG_VERSION"));

/// HTTP transport shared by a client and every service derived from it.
///
/// Cheaply cloneable; clones reference the same connection pool and the same
/// trace switches.
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    tracer: Tracer,
}

impl Transport {
    /// Wrap an existing `reqwest::Client`. Tracing starts disabled.
    pub fn new(http: Client) -> Self {
        Self {
            http,
            tracer: Tracer::default(),
        }
    }

    /// Build a transport with this crate's default `reqwest` settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialize).
    pub fn default_client() -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(TeamCityError::Transport)?;

        Ok(Self::new(http))
    }

    /// Install trace switches.
    #[must_use]
    pub fn with_trace_config(self, config: TraceConfig) -> Self {
        Self {
            tracer: self.tracer.with_config(config),
            ..self
        }
    }

    /// Send dumps to `sink` instead of standard output.
    #[must_use]
    pub fn with_sink(self, sink: impl TraceSink + 'static) -> Self {
        Self {
            tracer: self.tracer.with_sink(Arc::new(sink)),
            ..self
        }
    }

    /// The wrapped `reqwest` client.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Handle to the trace switches; toggling it affects every clone.
    pub fn trace_config(&self) -> &TraceConfig {
        self.tracer.config()
    }

    /// Send `request` and buffer the full response.
    ///
    /// Any status is returned as `Ok`; callers decide which statuses they accept.
    ///
    /// # Errors
    ///
    /// Returns [`TeamCityError::Transport`] if the request cannot be sent or the
    /// response body cannot be read.
    pub async fn execute(&self, request: Request) -> Result<ApiResponse> {
        self.tracer.observe_request(&request);
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self.http.execute(request).await?;
        let version = response.version();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received response");
        self.tracer.observe_response(version, status, &headers, &body);

        Ok(ApiResponse {
            version,
            status,
            headers,
            body,
        })
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    version: Version,
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Status line without the protocol, e.g. `404 Not Found`.
    pub fn status_line(&self) -> String {
        self.status.to_string()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text; invalid UTF-8 is replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Keep 2xx responses, turn everything else into [`TeamCityError::Api`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            return Ok(self);
        }
        Err(TeamCityError::Api {
            status: self.status_line(),
            body: self.text(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            version: Version::HTTP_11,
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_error_for_status_passes_success() {
        let resp = response(204, "").error_for_status().unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_error_for_status_keeps_body() {
        let err = response(404, "No project found").error_for_status().unwrap_err();
        match err {
            TeamCityError::Api { status, body } => {
                assert_eq!(status, "404 Not Found");
                assert_eq!(body, "No project found");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_json_parse_error() {
        let err = response(200, "not json").json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, TeamCityError::Parse(_)));
    }

    #[test]
    fn test_clones_share_trace_switches() {
        let transport = Transport::new(Client::new());
        let clone = transport.clone();
        clone.trace_config().set_requests(true);
        assert!(transport.trace_config().requests());
    }
}
