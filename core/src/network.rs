//! Network resource: DTOs and the `network` endpoint family.
//!
//! # Design
//! DTOs mirror the API's camelCase wire format and carry no behavior; every
//! field defaults so partial server documents deserialize cleanly. The
//! service itself is a thin facade: each method is a path, a verb, and a
//! dispatch through the shared [`Client`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;
use crate::error::Error;
use crate::transport::{Method, RawResponse};

/// A network as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Network {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub clock: i64,
    pub config: NetworkConfig,
    pub description: String,
    pub online_member_count: i64,
    pub rules_source: String,
}

/// The controller-side configuration document of a network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkConfig {
    pub active_member_count: i64,
    pub authorized_member_count: i64,
    pub total_member_count: i64,
    pub auth_tokens: Vec<String>,
    pub capabilities: Vec<String>,
    pub tags: Vec<String>,
    pub clock: i64,
    pub creation_time: i64,
    pub last_modified: i64,
    pub id: String,
    pub nwid: String,
    pub multicast_limit: i64,
    pub name: String,
    pub private: bool,
    pub revision: i64,
    pub routes: Vec<Route>,
    pub rules: Vec<Rule>,
    pub v4_assign_mode: V4AssignMode,
    pub v6_assign_mode: V6AssignMode,
}

/// A managed route pushed to network members.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Route {
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

/// A flow-rule entry from the network's rule set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rule {
    pub ethertype: i64,
    pub not: bool,
    pub or: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct V4AssignMode {
    pub zt: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct V6AssignMode {
    pub rfc4193: bool,
    #[serde(rename = "6plane")]
    pub sixplane: bool,
    pub zt: bool,
}

/// Facade over the `network` endpoint family. Obtained via
/// [`Client::network`].
#[derive(Debug, Clone, Copy)]
pub struct NetworkService<'a> {
    client: &'a Client,
}

impl<'a> NetworkService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List all networks visible to the token. GET `network`.
    pub fn list(&self) -> Result<Vec<Network>, Error> {
        let req = self.client.request(Method::Get, "network")?;
        let (networks, _) = self.client.send(req)?;
        Ok(networks)
    }

    /// Fetch one network. GET `network/<id>`.
    pub fn get(&self, id: &str) -> Result<Network, Error> {
        let req = self.client.request(Method::Get, &format!("network/{id}"))?;
        let (network, _) = self.client.send(req)?;
        Ok(network)
    }

    /// Update a network, or create one when the document carries no id.
    ///
    /// `body` is a raw JSON document passed through to the server as-is;
    /// only its `id` field is inspected, to pick the target path. An empty
    /// or absent `id` routes to `network/` (the creation path). POST
    /// `network/<id>`.
    ///
    /// # Panics
    ///
    /// Panics if `body` is not valid JSON. Callers are expected to
    /// pre-validate the document's shape.
    pub fn update(&self, body: &str) -> Result<Network, Error> {
        let document: Value = serde_json::from_str(body).expect("update body must be valid JSON");
        let id = document.get("id").and_then(Value::as_str).unwrap_or("");

        let req = self
            .client
            .request_json(Method::Post, &format!("network/{id}"), &document)?;
        let (network, _) = self.client.send(req)?;
        Ok(network)
    }

    /// Delete a network. DELETE `network/<id>`, no response body expected;
    /// the raw response is returned for status inspection.
    pub fn delete(&self, id: &str) -> Result<RawResponse, Error> {
        let req = self
            .client
            .request(Method::Delete, &format!("network/{id}"))?;
        self.client.send_raw(req)
    }
}
