//! In-memory fake of the Central API for tests and local development.
//!
//! Serves the `network` CRUD family and the `self` endpoint under `/api`,
//! enforces bearer authentication, and answers failures with the
//! `{"message": ...}` JSON shape the real service uses. Networks are stored
//! as raw JSON documents so update requests merge arbitrary fields, like
//! the controller does.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Error payload shape shared with the real API.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

type ApiFailure = (StatusCode, Json<ErrorMessage>);

pub type Db = Arc<RwLock<HashMap<String, Value>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api/network", get(list_networks))
        .route("/api/network/", post(create_network))
        .route(
            "/api/network/{id}",
            get(get_network).post(update_network).delete(delete_network),
        )
        .route("/api/self", get(get_self))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn failure(status: StatusCode, message: &str) -> ApiFailure {
    (
        status,
        Json(ErrorMessage {
            message: message.to_string(),
        }),
    )
}

/// Any `bearer` token passes; the point is that one must be present.
fn check_auth(headers: &HeaderMap) -> Result<(), ApiFailure> {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.to_ascii_lowercase().starts_with("bearer "));
    if authorized {
        Ok(())
    } else {
        Err(failure(
            StatusCode::UNAUTHORIZED,
            "authentication required",
        ))
    }
}

fn not_found() -> ApiFailure {
    failure(StatusCode::NOT_FOUND, "network not found")
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// 16-hex-digit network id, the format the controller hands out.
fn mint_id() -> String {
    Uuid::new_v4().simple().to_string()[..16].to_string()
}

/// Deep-merge `patch` into `target`; non-object values are replaced.
fn merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                merge(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

async fn list_networks(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<Value>>, ApiFailure> {
    check_auth(&headers)?;
    let networks = db.read().await;
    Ok(Json(networks.values().cloned().collect()))
}

async fn create_network(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<Value>,
) -> Result<Json<Value>, ApiFailure> {
    check_auth(&headers)?;
    let id = mint_id();
    let mut network = json!({
        "id": id,
        "type": "Network",
        "clock": now_ms(),
        "config": {
            "id": id,
            "nwid": id,
            "creationTime": now_ms(),
            "name": "",
            "private": true,
        },
    });
    merge(&mut network, &input);
    network["id"] = json!(id);
    network["config"]["id"] = json!(id);
    network["config"]["nwid"] = json!(id);

    db.write().await.insert(id, network.clone());
    Ok(Json(network))
}

async fn get_network(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiFailure> {
    check_auth(&headers)?;
    let networks = db.read().await;
    networks.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_network(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, ApiFailure> {
    check_auth(&headers)?;
    let mut networks = db.write().await;
    let network = networks.get_mut(&id).ok_or_else(not_found)?;
    merge(network, &input);
    network["id"] = json!(id);
    network["clock"] = json!(now_ms());
    network["config"]["lastModified"] = json!(now_ms());
    Ok(Json(network.clone()))
}

async fn delete_network(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiFailure> {
    check_auth(&headers)?;
    let mut networks = db.write().await;
    networks
        .remove(&id)
        .map(|_| StatusCode::OK)
        .ok_or_else(not_found)
}

async fn get_self(headers: HeaderMap) -> Result<Json<Value>, ApiFailure> {
    check_auth(&headers)?;
    Ok(Json(json!({
        "id": "6d12a1bb-909c-4a32-b8e6-b8ffd7e206b1",
        "type": "User",
        "clock": now_ms(),
        "displayName": "Mock User",
        "email": "mock@example.com",
        "smsNumber": "",
        "tokens": [],
        "globalPermissions": {"a": true, "d": true, "m": true, "r": true},
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_are_16_hex_digits() {
        let id = mint_id();
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn merge_replaces_scalars_and_merges_objects() {
        let mut target = json!({"id": "abc", "config": {"name": "old", "private": true}});
        merge(&mut target, &json!({"config": {"name": "new"}}));
        assert_eq!(target["config"]["name"], "new");
        assert_eq!(target["config"]["private"], true);
        assert_eq!(target["id"], "abc");
    }

    #[test]
    fn merge_inserts_missing_keys() {
        let mut target = json!({"config": {}});
        merge(&mut target, &json!({"config": {"multicastLimit": 32}}));
        assert_eq!(target["config"]["multicastLimit"], 32);
    }
}
