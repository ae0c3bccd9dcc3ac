//! Client library for the Central network-management REST API.
//!
//! # Overview
//! Every endpoint family goes through one shared pipeline: the [`Client`]
//! resolves a resource path against its endpoint, serializes an optional
//! JSON body, attaches the bearer-token and user-agent headers, sends the
//! request through a pluggable [`Transport`], and classifies the response —
//! 2xx bodies decode into typed results, everything else becomes an
//! [`ApiError`] carrying method, URL, status, and the server's message.
//!
//! # Design
//! - `Client` is immutable after construction and safe to share across
//!   threads; dispatch is blocking and issues exactly one request per call.
//! - The [`Transport`] trait takes plain-data requests and returns
//!   fully-read responses, so tests substitute a double without touching
//!   calling code; [`UreqTransport`] is the default executor.
//! - Resource services ([`NetworkService`], [`SelfService`]) are thin
//!   facades declaring only a path and a verb per operation.

pub mod client;
pub mod error;
pub mod network;
pub mod transport;
pub mod user;

pub use client::{Client, ClientBuilder, DEFAULT_ENDPOINT};
pub use error::{ApiError, Error};
pub use network::{Network, NetworkConfig, NetworkService, Route, Rule, V4AssignMode, V6AssignMode};
pub use transport::{Method, PreparedRequest, RawResponse, Transport, UreqTransport};
pub use user::{GlobalPermissions, SelfService, User};
