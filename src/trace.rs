//! Wire-level request/response tracing.
//!
//! A [`TraceConfig`] is handed to the [`Transport`](crate::Transport) when it
//! is built. Its two switches are independent and off by default; when on,
//! the transport dumps the raw request or response to a [`TraceSink`].
//! Dumping only observes: it never alters what is sent or received, and a
//! dump that cannot be produced is logged and dropped.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Request, StatusCode, Version};
use thiserror::Error;

/// Reasons a request or response could not be rendered as text.
#[derive(Debug, Error)]
pub enum DumpError {
    /// A header value contains bytes that are not visible ASCII.
    #[error("header '{0}' has a non-text value")]
    NonTextHeader(String),

    /// The request body is a stream and was not buffered.
    #[error("request body is a stream and cannot be dumped")]
    StreamingBody,
}

#[derive(Debug, Default)]
struct Switches {
    requests: AtomicBool,
    responses: AtomicBool,
}

/// Request/response dump switches.
///
/// Clones share the same switches, so an application can keep a handle and
/// flip tracing on or off while the transport is in use. Updates are relaxed:
/// a request already in flight may or may not observe a concurrent toggle.
///
/// Dumps print headers in full except sensitive ones: `Authorization` (and
/// any other value marked sensitive) appears as `<redacted>`, so credentials
/// cannot be checked from a dump.
#[derive(Debug, Clone, Default)]
pub struct TraceConfig {
    switches: Arc<Switches>,
}

impl TraceConfig {
    /// Both switches off.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_requests(self, enabled: bool) -> Self {
        self.set_requests(enabled);
        self
    }

    #[must_use]
    pub fn with_responses(self, enabled: bool) -> Self {
        self.set_responses(enabled);
        self
    }

    /// Turn request dumping on or off.
    pub fn set_requests(&self, enabled: bool) {
        self.switches.requests.store(enabled, Ordering::Relaxed);
    }

    /// Turn response dumping on or off.
    pub fn set_responses(&self, enabled: bool) {
        self.switches.responses.store(enabled, Ordering::Relaxed);
    }

    pub fn requests(&self) -> bool {
        self.switches.requests.load(Ordering::Relaxed)
    }

    pub fn responses(&self) -> bool {
        self.switches.responses.load(Ordering::Relaxed)
    }
}

/// Destination for request/response dumps.
pub trait TraceSink: Send + Sync {
    /// Receive one complete dump.
    fn write(&self, dump: &str);
}

/// Writes dumps to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl TraceSink for StdoutSink {
    fn write(&self, dump: &str) {
        println!("{dump}\n");
    }
}

/// The hook installed in a transport: switches plus sink.
#[derive(Clone)]
pub(crate) struct Tracer {
    config: TraceConfig,
    sink: Arc<dyn TraceSink>,
}

impl std::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new(TraceConfig::default(), Arc::new(StdoutSink))
    }
}

impl Tracer {
    pub(crate) fn new(config: TraceConfig, sink: Arc<dyn TraceSink>) -> Self {
        Self { config, sink }
    }

    pub(crate) fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub(crate) fn with_config(self, config: TraceConfig) -> Self {
        Self { config, ..self }
    }

    pub(crate) fn with_sink(self, sink: Arc<dyn TraceSink>) -> Self {
        Self { sink, ..self }
    }

    pub(crate) fn observe_request(&self, request: &Request) {
        if !self.config.requests() {
            return;
        }
        match dump_request(request) {
            Ok(dump) => self.sink.write(&dump),
            Err(e) => tracing::warn!(error = %e, "failed to dump request"),
        }
    }

    pub(crate) fn observe_response(
        &self,
        version: Version,
        status: StatusCode,
        headers: &HeaderMap,
        body: &[u8],
    ) {
        if !self.config.responses() {
            return;
        }
        match dump_response(version, status, headers, body) {
            Ok(dump) => self.sink.write(&dump),
            Err(e) => tracing::warn!(error = %e, "failed to dump response"),
        }
    }
}

/// Render a request as it goes on the wire: request line, headers, body.
///
/// Sensitive header values (such as `Authorization`) are replaced by a
/// placeholder.
pub fn dump_request(request: &Request) -> Result<String, DumpError> {
    let url = request.url();
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut out = format!("{} {} {:?}\r\n", request.method(), target, request.version());
    if let Some(host) = url.host_str() {
        match url.port() {
            Some(port) => {
                let _ = write!(out, "host: {host}:{port}\r\n");
            }
            None => {
                let _ = write!(out, "host: {host}\r\n");
            }
        }
    }
    write_headers(&mut out, request.headers())?;
    out.push_str("\r\n");

    if let Some(body) = request.body() {
        let bytes = body.as_bytes().ok_or(DumpError::StreamingBody)?;
        out.push_str(&String::from_utf8_lossy(bytes));
    }

    Ok(out)
}

/// Render a response: status line, headers, body.
pub fn dump_response(
    version: Version,
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<String, DumpError> {
    let mut out = format!("{version:?} {status}\r\n");
    write_headers(&mut out, headers)?;
    out.push_str("\r\n");
    out.push_str(&String::from_utf8_lossy(body));
    Ok(out)
}

fn write_headers(out: &mut String, headers: &HeaderMap) -> Result<(), DumpError> {
    for (name, value) in headers {
        if value.is_sensitive() {
            let _ = write!(out, "{name}: <redacted>\r\n");
            continue;
        }
        let text = value
            .to_str()
            .map_err(|_| DumpError::NonTextHeader(name.to_string()))?;
        let _ = write!(out, "{name}: {text}\r\n");
    }
    Ok(())
}
