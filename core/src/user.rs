//! Account resource: the `self` endpoint.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::transport::Method;

/// The account the API token belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub clock: i64,
    pub display_name: String,
    pub email: String,
    pub sms_number: String,
    pub tokens: Vec<String>,
    pub global_permissions: GlobalPermissions,
}

/// Coarse account-wide permission flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobalPermissions {
    pub a: bool,
    pub d: bool,
    pub m: bool,
    pub r: bool,
}

/// Facade over the `self` endpoint. Obtained via [`Client::me`].
#[derive(Debug, Clone, Copy)]
pub struct SelfService<'a> {
    client: &'a Client,
}

impl<'a> SelfService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetch the current account. GET `self`.
    pub fn get(&self) -> Result<User, Error> {
        let req = self.client.request(Method::Get, "self")?;
        let (user, _) = self.client.send(req)?;
        Ok(user)
    }
}
