//! Pluggable HTTP transport for the Central API client.
//!
//! # Design
//! Requests and responses cross the transport boundary as plain data. The
//! client builds a `PreparedRequest`, a `Transport` executes exactly one
//! round-trip, and the fully-read `RawResponse` comes back for status
//! classification and decoding. Swapping the transport (for tests, or for a
//! different HTTP stack) never touches the calling code.
//!
//! A transport must fully consume the response body before returning, on
//! every path, so no connection is left held open past the dispatch call.

use url::Url;

use crate::error::Error;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Uppercase wire name, as it appears on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by [`Client::request`](crate::Client::request) and
/// [`Client::request_json`](crate::Client::request_json): the URL is already
/// resolved against the endpoint and the auth headers are already attached.
/// Constructed fresh per call, never reused.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response with its body fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// One HTTP round-trip: send a prepared request, return the raw response.
///
/// Implementations send the request exactly once — no retries — and must
/// read the response body to completion before returning, releasing the
/// underlying connection on success and failure paths alike. Network-level
/// failures are reported as [`Error::Transport`]. Implementations shared
/// across threads document their own concurrency safety.
pub trait Transport: Send + Sync {
    fn send(&self, request: &PreparedRequest) -> Result<RawResponse, Error>;
}

/// Default blocking transport backed by a `ureq::Agent`.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses come back as data for the client's classifier rather than as
/// transport errors. The agent pools connections and is safe to share
/// across threads.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

/// Apply prepared headers to either flavor of ureq request builder.
fn with_headers<B>(
    mut req: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        req = req.header(name.as_str(), value.as_str());
    }
    req
}

impl Transport for UreqTransport {
    fn send(&self, request: &PreparedRequest) -> Result<RawResponse, Error> {
        let url = request.url.as_str();
        let headers = &request.headers;
        let result = match (request.method, &request.body) {
            (Method::Get, _) => with_headers(self.agent.get(url), headers).call(),
            (Method::Delete, _) => with_headers(self.agent.delete(url), headers).call(),
            (Method::Post, Some(body)) => {
                with_headers(self.agent.post(url), headers).send(body.as_bytes())
            }
            (Method::Post, None) => with_headers(self.agent.post(url), headers).send_empty(),
            (Method::Put, Some(body)) => {
                with_headers(self.agent.put(url), headers).send(body.as_bytes())
            }
            (Method::Put, None) => with_headers(self.agent.put(url), headers).send_empty(),
        };
        let mut response = result.map_err(|e| Error::Transport(Box::new(e)))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::Transport(Box::new(e)))?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
