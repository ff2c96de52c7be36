#![allow(dead_code, clippy::expect_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use scoreboard_api::config::{Config, Environment};
use scoreboard_api::state::AppState;

/// Fresh, migrated in-memory database.
pub async fn test_db() -> DatabaseConnection {
    let db = scoreboard_api::db::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should open");
    Migrator::up(&db, None)
        .await
        .expect("migrations should apply");
    db
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: std::net::IpAddr::from([127, 0, 0, 1]),
        server_port: 0,
        environment: Environment::Development,
        log_level: "warn".to_string(),
        frontend_url: "http://localhost:3000".to_string(),
    }
}

pub async fn test_app() -> Router {
    let state = AppState {
        db: test_db().await,
        config: test_config(),
    };
    scoreboard_api::routes::router().with_state(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let body_str = String::from_utf8(body.to_vec()).unwrap_or_default();

    (status, body_str)
}

/// Test helper: send a GET request to the app and return (status, body).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_default();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_default();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, String) {
    send_json(app, "POST", uri, body.to_string()).await
}

pub async fn put_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, String) {
    send_json(app, "PUT", uri, body.to_string()).await
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: String) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap_or_default();
    send(app, request).await
}

pub fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_default()
}

/// Create a player over HTTP and return its id.
pub async fn create_player(app: &Router, name: &str) -> i64 {
    let (status, body) = post_json(app, "/api/players", &serde_json::json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "create player failed: {body}");
    parse(&body)["id"].as_i64().unwrap_or_default()
}

/// Record a match over HTTP and return its id.
pub async fn create_match(app: &Router, a: i64, b: i64, score_a: i64, score_b: i64) -> i64 {
    let (status, body) = post_json(
        app,
        "/api/matches",
        &serde_json::json!({
            "player_a_id": a,
            "player_b_id": b,
            "score_a": score_a,
            "score_b": score_b,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create match failed: {body}");
    parse(&body)["id"].as_i64().unwrap_or_default()
}
