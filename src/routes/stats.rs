use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppError;
use crate::state::AppState;
use crate::stats::StatsSummary;

pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(get_stats))
}

/// `GET /api/stats`
async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsSummary>, AppError> {
    let summary = state.stats().compute().await?;
    Ok(Json(summary))
}
