use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::entities::matches;
use crate::error::AppError;
use crate::repositories::MatchInput;
use crate::state::AppState;

/// Build the match route group: `/api/matches/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_matches).post(create_match))
        .route(
            "/{id}",
            get(get_match).put(update_match).delete(delete_match),
        )
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Wide integer fields so out-of-range values reach validation instead of
/// failing deserialization.
#[derive(Debug, Deserialize)]
struct MatchRequest {
    player_a_id: Option<i64>,
    player_b_id: Option<i64>,
    score_a: Option<i64>,
    score_b: Option<i64>,
}

impl TryFrom<MatchRequest> for MatchInput {
    type Error = AppError;

    fn try_from(req: MatchRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            player_a_id: required(req.player_a_id, "player_a_id")?,
            player_b_id: required(req.player_b_id, "player_b_id")?,
            score_a: required(req.score_a, "score_a")?,
            score_b: required(req.score_b, "score_b")?,
        })
    }
}

fn required(value: Option<i64>, field: &str) -> Result<i32, AppError> {
    let value = value.ok_or_else(|| AppError::BadRequest(format!("{field} is required")))?;
    i32::try_from(value).map_err(|_| AppError::BadRequest(format!("{field} is out of range")))
}

#[derive(Debug, Serialize)]
struct CreatedResponse {
    id: i32,
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /api/matches`
async fn list_matches(State(state): State<AppState>) -> Result<Json<Vec<matches::Model>>, AppError> {
    Ok(Json(state.matches().get_all().await?))
}

/// `POST /api/matches`
async fn create_match(
    State(state): State<AppState>,
    body: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(body) = body?;
    let id = state.matches().create(body.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `GET /api/matches/{id}`
async fn get_match(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<matches::Model>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.matches().get_by_id(id).await?))
}

/// `PUT /api/matches/{id}`
async fn update_match(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<matches::Model>, AppError> {
    let Path(id) = id?;
    let Json(body) = body?;
    Ok(Json(state.matches().update(id, body.try_into()?).await?))
}

/// `DELETE /api/matches/{id}`
async fn delete_match(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.matches().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
