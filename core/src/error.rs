//! Error types for the Central API client.
//!
//! # Design
//! One `Error` enum covers every failure class, so all public operations
//! return `Result<_, Error>`. Non-2xx responses get the dedicated
//! [`ApiError`] struct, which keeps the full raw response: callers
//! frequently branch on status or the server's message (e.g. "network not
//! found") and should not need a second request to do so.

use thiserror::Error;
use url::Url;

use crate::transport::{Method, RawResponse};

/// Errors returned by [`Client`](crate::Client) operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure (DNS, connection refused, timeout). Surfaced
    /// verbatim from the transport; never retried.
    #[error("transport: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// The endpoint or a relative resource path is not a valid URI
    /// reference. Raised before any network call.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The request body could not be serialized to JSON. Raised before any
    /// network call.
    #[error("request encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// A response body (success or error payload) did not match the
    /// expected JSON shape.
    #[error("response decoding failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The server answered with a status outside the 2xx range.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A non-2xx API response, with the originating request's method and URL.
///
/// `message` comes from the error body's optional `message` field and is
/// empty when the server sent no body. `response` is the full raw response
/// for diagnostic inspection of status, headers, or the unparsed payload.
#[derive(Debug, Error)]
#[error("{method} {url}: {status} {message}")]
pub struct ApiError {
    pub method: Method,
    pub url: Url,
    pub status: u16,
    pub message: String,
    pub response: RawResponse,
}
