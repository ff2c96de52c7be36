use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::entities::{matches, players};
use crate::error::AppError;
use crate::state::AppState;

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

/// Build the player route group: `/api/players/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_players).post(create_player))
        .route(
            "/{id}",
            get(get_player).put(update_player).delete(delete_player),
        )
        .route("/{id}/matches", get(list_player_matches))
}

// ─────────────────────────────────────────────────────────────────────────────
// DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PlayerRequest {
    #[serde(default)]
    name: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /api/players`
async fn list_players(State(state): State<AppState>) -> Result<Json<Vec<players::Model>>, AppError> {
    Ok(Json(state.players().get_all().await?))
}

/// `POST /api/players`
async fn create_player(
    State(state): State<AppState>,
    body: Result<Json<PlayerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<players::Model>), AppError> {
    let Json(body) = body?;
    let player = state.players().create(&body.name).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// `GET /api/players/{id}`
async fn get_player(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<players::Model>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.players().get_by_id(id).await?))
}

/// `PUT /api/players/{id}`
async fn update_player(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<PlayerRequest>, JsonRejection>,
) -> Result<Json<players::Model>, AppError> {
    let Path(id) = id?;
    let Json(body) = body?;
    Ok(Json(state.players().update(id, &body.name).await?))
}

/// `DELETE /api/players/{id}`
async fn delete_player(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.players().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/players/{id}/matches`
async fn list_player_matches(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<matches::Model>>, AppError> {
    let Path(id) = id?;
    // Unknown players get a 404 rather than an empty history
    state.players().get_by_id(id).await?;
    Ok(Json(state.matches().get_by_player(id).await?))
}
