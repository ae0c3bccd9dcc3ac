//! Shared request construction, dispatch, and status classification.
//!
//! # Design
//! `Client` holds the process-wide configuration (endpoint, token,
//! user-agent, transport) and is immutable after construction, so one
//! instance can serve concurrent calls from many threads. Every resource
//! service funnels through the same three steps: build a
//! [`PreparedRequest`] (URL resolution, JSON encoding, auth headers), send
//! it through the [`Transport`], classify the response status. Per-resource
//! methods reduce to a path and a verb.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

use crate::error::{ApiError, Error};
use crate::network::NetworkService;
use crate::transport::{Method, PreparedRequest, RawResponse, Transport, UreqTransport};
use crate::user::SelfService;

/// Production API root used when the builder is given no endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://my.zerotier.com/api/";

const DEFAULT_USER_AGENT: &str = concat!("central-core/", env!("CARGO_PKG_VERSION"));

/// Client for the Central network-management API.
///
/// Construct via [`Client::new`] for the defaults or [`Client::builder`]
/// to override endpoint, user-agent, or transport. Resource services are
/// reached through [`Client::network`] and [`Client::me`].
#[derive(Clone)]
pub struct Client {
    endpoint: Url,
    api_token: String,
    user_agent: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint.as_str())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Client against the production endpoint with the default transport.
    pub fn new(api_token: &str) -> Self {
        // The default endpoint is a valid URL, so build cannot fail here.
        Self::builder()
            .api_token(api_token)
            .build()
            .unwrap_or_else(|_| unreachable!("default configuration is valid"))
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// The network resource service.
    pub fn network(&self) -> NetworkService<'_> {
        NetworkService::new(self)
    }

    /// The account/self resource service.
    pub fn me(&self) -> SelfService<'_> {
        SelfService::new(self)
    }

    /// Build a body-less request for `path` resolved against the endpoint.
    ///
    /// Resolution follows standard relative-URL semantics: a relative path
    /// appends under the endpoint, an absolute path replaces the endpoint's
    /// path segments. Attaches the `Authorization: bearer <token>` and
    /// `User-Agent` headers.
    pub fn request(&self, method: Method, path: &str) -> Result<PreparedRequest, Error> {
        let url = self.endpoint.join(path)?;
        Ok(PreparedRequest {
            method,
            url,
            headers: self.base_headers(),
            body: None,
        })
    }

    /// Build a request carrying `body` serialized to JSON.
    ///
    /// The wire payload is exactly the JSON serialization of `body`, with
    /// `Content-Type: application/json` set alongside the auth headers.
    /// Serialization failure yields [`Error::Encode`] and no request.
    pub fn request_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<PreparedRequest, Error> {
        let url = self.endpoint.join(path)?;
        let body = serde_json::to_string(body).map_err(Error::Encode)?;
        let mut headers = self.base_headers();
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        Ok(PreparedRequest {
            method,
            url,
            headers,
            body: Some(body),
        })
    }

    /// Dispatch `request` and decode a 2xx body into `T`.
    ///
    /// Returns the decoded value together with the raw response, so callers
    /// that care about headers keep access to them. Decode failure yields
    /// [`Error::Decode`]; non-2xx statuses yield [`Error::Api`] exactly as
    /// [`Client::send_raw`] does.
    pub fn send<T: DeserializeOwned>(
        &self,
        request: PreparedRequest,
    ) -> Result<(T, RawResponse), Error> {
        let response = self.send_raw(request)?;
        let value = serde_json::from_str(&response.body).map_err(Error::Decode)?;
        Ok((value, response))
    }

    /// Dispatch `request` without decoding the response body.
    ///
    /// Exactly one transport send per call. A transport failure surfaces
    /// unchanged as [`Error::Transport`]; a non-2xx status is classified
    /// into [`Error::Api`], which carries the raw response for inspection.
    pub fn send_raw(&self, request: PreparedRequest) -> Result<RawResponse, Error> {
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self.transport.send(&request)?;
        tracing::debug!(status = response.status, "response received");
        check_response(request.method, &request.url, &response)?;
        Ok(response)
    }

    fn base_headers(&self) -> Vec<(String, String)> {
        vec![
            (
                "Authorization".to_string(),
                format!("bearer {}", self.api_token),
            ),
            ("User-Agent".to_string(), self.user_agent.clone()),
        ]
    }
}

/// Configuration for [`Client`]; every field is optional with a default.
#[derive(Default)]
pub struct ClientBuilder {
    endpoint: Option<String>,
    api_token: Option<String>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Base API URL. Defaults to [`DEFAULT_ENDPOINT`].
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    /// Opaque bearer token sent on every request. Defaults to empty.
    pub fn api_token(mut self, token: &str) -> Self {
        self.api_token = Some(token.to_string());
        self
    }

    /// Client-identifying `User-Agent` value. Defaults to
    /// `central-core/<version>`.
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    /// HTTP executor. Defaults to [`UreqTransport`].
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Fails only if a supplied endpoint is not a valid absolute URL.
    pub fn build(self) -> Result<Client, Error> {
        let endpoint = Url::parse(self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))?;
        Ok(Client {
            endpoint,
            api_token: self.api_token.unwrap_or_default(),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(UreqTransport::default())),
        })
    }
}

/// Classify a response status: 2xx passes, everything else becomes an
/// [`ApiError`] built from the originating method and URL.
///
/// An empty error body leaves the message empty; a non-empty body is
/// decoded as `{ "message"?: string }`, and a body that fails to decode
/// propagates [`Error::Decode`] rather than a half-built `ApiError`.
fn check_response(method: Method, url: &Url, response: &RawResponse) -> Result<(), Error> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }

    let message = if response.body.is_empty() {
        String::new()
    } else {
        let body: ErrorBody = serde_json::from_str(&response.body).map_err(Error::Decode)?;
        body.message.unwrap_or_default()
    };

    Err(Error::Api(ApiError {
        method,
        url: url.clone(),
        status: response.status,
        message,
        response: response.clone(),
    }))
}

/// Error payload shape used by the API; `message` is optional by
/// convention.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
