use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn authed_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, "bearer t0k3n")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn requests_without_bearer_token_are_rejected() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/network")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "authentication required");
}

// --- list ---

#[tokio::test]
async fn list_networks_empty() {
    let resp = app()
        .oneshot(authed_request("GET", "/api/network", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let networks = body_json(resp).await;
    assert_eq!(networks, json!([]));
}

// --- create / get ---

#[tokio::test]
async fn create_assigns_id_and_get_returns_the_network() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/network/",
            r#"{"config":{"name":"home"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;

    let id = created["id"].as_str().unwrap();
    assert_eq!(id.len(), 16);
    assert_eq!(created["config"]["name"], "home");
    assert_eq!(created["config"]["nwid"], id);

    let resp = app
        .oneshot(authed_request("GET", &format!("/api/network/{id}"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = body_json(resp).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["config"]["name"], "home");
}

#[tokio::test]
async fn get_unknown_network_is_404_with_message() {
    let resp = app()
        .oneshot(authed_request("GET", "/api/network/deadbeef00000000", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "network not found");
}

// --- update ---

#[tokio::test]
async fn update_merges_fields_and_preserves_the_rest() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/network/",
            r#"{"config":{"name":"home"}}"#,
        ))
        .await
        .unwrap();
    let created = body_json(resp).await;
    let id = created["id"].as_str().unwrap();

    let resp = app
        .oneshot(authed_request(
            "POST",
            &format!("/api/network/{id}"),
            r#"{"config":{"private":false}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["config"]["private"], false);
    assert_eq!(updated["config"]["name"], "home");
    assert_eq!(updated["id"], created["id"]);
}

// --- delete ---

#[tokio::test]
async fn delete_removes_the_network() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(authed_request("POST", "/api/network/", "{}"))
        .await
        .unwrap();
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(authed_request("DELETE", &format!("/api/network/{id}"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(authed_request("GET", &format!("/api/network/{id}"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- self ---

#[tokio::test]
async fn self_returns_the_account_document() {
    let resp = app()
        .oneshot(authed_request("GET", "/api/self", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user = body_json(resp).await;
    assert_eq!(user["type"], "User");
    assert_eq!(user["displayName"], "Mock User");
    assert_eq!(user["globalPermissions"]["a"], true);
}
