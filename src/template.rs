//! Request templates.
//!
//! A [`RequestTemplate`] is the authenticated base every request starts
//! from: base URL, path prefix, credentials and default headers. It is a
//! plain value; [`RequestTemplate::derive`] returns a new, independent
//! template and never touches the original.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Request};
use url::Url;

use crate::error::{Result, TeamCityError};

/// Media type for JSON requests and the default `Accept` header.
pub const APPLICATION_JSON: &str = "application/json";

/// Media type for endpoints that take a raw string body.
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// HTTP Basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// A request body and the content type it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Serialized as JSON, sent as `application/json`.
    Json(serde_json::Value),
    /// Sent verbatim as `text/plain; charset=utf-8`.
    Text(String),
}

impl Body {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => APPLICATION_JSON,
            Self::Text(_) => TEXT_PLAIN,
        }
    }

    fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Self::Json(value) => Ok(serde_json::to_vec(&value)?),
            Self::Text(text) => Ok(text.into_bytes()),
        }
    }
}

/// Authenticated base for requests against one part of the REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTemplate {
    base_url: Url,
    path: String,
    credentials: Credentials,
    headers: HeaderMap,
}

impl RequestTemplate {
    /// Template rooted at `base_url` with `Accept: application/json`.
    ///
    /// `base_url` must end with `/` for relative paths to resolve below it.
    pub fn new(base_url: Url, credentials: Credentials) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        Self {
            base_url,
            path: String::new(),
            credentials,
            headers,
        }
    }

    /// Copy this template, narrowing its path by `suffix` when given.
    ///
    /// The suffix is appended to the current prefix and always ends up
    /// terminated by `/`.
    #[must_use]
    pub fn derive(&self, suffix: Option<&str>) -> Self {
        let mut derived = self.clone();
        if let Some(suffix) = suffix.map(|s| s.trim_matches('/')).filter(|s| !s.is_empty()) {
            derived.path.push_str(suffix);
            derived.path.push('/');
        }
        derived
    }

    /// Copy with an extra default header; an existing value is replaced.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Path prefix relative to the base URL (empty for the root template).
    pub fn path_prefix(&self) -> &str {
        &self.path
    }

    /// Effective base of every request issued through this template.
    pub fn base_path(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Resolve `path` below this template's prefix.
    pub fn url(&self, path: &str) -> Result<Url> {
        let relative = format!("{}{}", self.path, path.trim_start_matches('/'));
        Ok(self.base_url.join(&relative)?)
    }

    /// Build an authenticated request for `path` on `http`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be resolved, the JSON body cannot
    /// be serialized, or `reqwest` rejects the request.
    pub fn build(
        &self,
        http: &Client,
        method: Method,
        path: &str,
        body: Option<Body>,
    ) -> Result<Request> {
        let url = self.url(path)?;
        let mut builder = http
            .request(method, url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .headers(self.headers.clone());

        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, body.content_type())
                .body(body.into_bytes()?);
        }

        builder.build().map_err(TeamCityError::Transport)
    }
}
