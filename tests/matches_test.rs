mod common;

use axum::Router;
use axum::http::StatusCode;
use serde_json::json;

async fn two_players(app: &Router) -> (i64, i64) {
    let a = common::create_player(app, "Ada").await;
    let b = common::create_player(app, "Grace").await;
    (a, b)
}

async fn match_count(app: &Router) -> usize {
    let (_, body) = common::get(app, "/api/matches").await;
    common::parse(&body).as_array().map_or(0, Vec::len)
}

// ─────────────────────────────────────────────────────────────────────────────
// Create
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_match_round_trip() {
    let app = common::test_app().await;
    let (a, b) = two_players(&app).await;

    let id = common::create_match(&app, a, b, 11, 7).await;
    assert!(id > 0);

    let (status, body) = common::get(&app, &format!("/api/matches/{id}")).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let v = common::parse(&body);
    assert_eq!(v["id"], id);
    assert_eq!(v["player_a_id"], a);
    assert_eq!(v["player_b_id"], b);
    assert_eq!(v["score_a"], 11);
    assert_eq!(v["score_b"], 7);
    assert!(v["played_at"].is_string());
}

#[tokio::test]
async fn create_match_returns_only_id() {
    let app = common::test_app().await;
    let (a, b) = two_players(&app).await;

    let (status, body) = common::post_json(
        &app,
        "/api/matches",
        &json!({ "player_a_id": a, "player_b_id": b, "score_a": 0, "score_b": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    let v = common::parse(&body);
    assert!(v["id"].is_i64());
    assert_eq!(v.as_object().map(serde_json::Map::len), Some(1));
}

#[tokio::test]
async fn create_match_rejects_invalid_input() {
    let app = common::test_app().await;
    let (a, b) = two_players(&app).await;

    for body in [
        json!({ "player_a_id": 0, "player_b_id": b, "score_a": 1, "score_b": 0 }),
        json!({ "player_a_id": a, "player_b_id": -3, "score_a": 1, "score_b": 0 }),
        json!({ "player_a_id": a, "player_b_id": b, "score_a": -1, "score_b": 0 }),
        json!({ "player_a_id": a, "player_b_id": b, "score_a": 1 }),
        json!({ "player_a_id": a, "player_b_id": b, "score_a": "ten", "score_b": 0 }),
    ] {
        let (status, response) = common::post_json(&app, "/api/matches", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body} -> {response}");
    }

    assert_eq!(match_count(&app).await, 0);
}

#[tokio::test]
async fn create_match_unknown_player() {
    let app = common::test_app().await;
    let (a, _) = two_players(&app).await;

    let (status, body) = common::post_json(
        &app,
        "/api/matches",
        &json!({ "player_a_id": a, "player_b_id": 99, "score_a": 2, "score_b": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    let message = common::parse(&body)["error"]["message"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    assert!(message.contains("99"), "{message}");
    assert_eq!(match_count(&app).await, 0);
}

#[tokio::test]
async fn create_match_reports_side_a_first() {
    let app = common::test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/api/matches",
        &json!({ "player_a_id": 7, "player_b_id": 8, "score_a": 2, "score_b": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        common::parse(&body)["error"]["message"],
        "player 7 does not exist"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Read
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_matches_in_id_order() {
    let app = common::test_app().await;
    let (a, b) = two_players(&app).await;
    let first = common::create_match(&app, a, b, 1, 0).await;
    let second = common::create_match(&app, b, a, 4, 4).await;

    let (status, body) = common::get(&app, "/api/matches").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = common::parse(&body)
        .as_array()
        .map(|matches| matches.iter().filter_map(|m| m["id"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ids, [first, second]);
}

#[tokio::test]
async fn get_match_not_found() {
    let app = common::test_app().await;

    let (status, _) = common::get(&app, "/api/matches/12").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─────────────────────────────────────────────────────────────────────────────
// Update
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_match_replaces_fields() {
    let app = common::test_app().await;
    let (a, b) = two_players(&app).await;
    let id = common::create_match(&app, a, b, 1, 0).await;
    let (_, before) = common::get(&app, &format!("/api/matches/{id}")).await;

    let (status, body) = common::put_json(
        &app,
        &format!("/api/matches/{id}"),
        &json!({ "player_a_id": b, "player_b_id": a, "score_a": 6, "score_b": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let v = common::parse(&body);
    assert_eq!(v["player_a_id"], b);
    assert_eq!(v["player_b_id"], a);
    assert_eq!(v["score_a"], 6);
    assert_eq!(v["score_b"], 2);
    assert_eq!(v["played_at"], common::parse(&before)["played_at"]);
}

#[tokio::test]
async fn update_match_validates_references() {
    let app = common::test_app().await;
    let (a, b) = two_players(&app).await;
    let id = common::create_match(&app, a, b, 1, 0).await;

    let (status, _) = common::put_json(
        &app,
        &format!("/api/matches/{id}"),
        &json!({ "player_a_id": a, "player_b_id": 404, "score_a": 1, "score_b": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::put_json(
        &app,
        &format!("/api/matches/{id}"),
        &json!({ "player_a_id": a, "player_b_id": b, "score_a": -1, "score_b": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = common::get(&app, &format!("/api/matches/{id}")).await;
    assert_eq!(common::parse(&body)["player_b_id"], b);
}

#[tokio::test]
async fn update_match_not_found() {
    let app = common::test_app().await;
    let (a, b) = two_players(&app).await;

    let (status, _) = common::put_json(
        &app,
        "/api/matches/77",
        &json!({ "player_a_id": a, "player_b_id": b, "score_a": 1, "score_b": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─────────────────────────────────────────────────────────────────────────────
// Delete
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_match_success() {
    let app = common::test_app().await;
    let (a, b) = two_players(&app).await;
    let id = common::create_match(&app, a, b, 1, 0).await;

    let (status, _) = common::delete(&app, &format!("/api/matches/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = common::get(&app, &format!("/api/matches/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Once the history is gone the player may be removed
    let (status, _) = common::delete(&app, &format!("/api/players/{a}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn delete_match_not_found() {
    let app = common::test_app().await;
    let (a, b) = two_players(&app).await;
    common::create_match(&app, a, b, 1, 0).await;

    let (status, _) = common::delete(&app, "/api/matches/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(match_count(&app).await, 1);
}
