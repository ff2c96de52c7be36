mod health;
mod matches;
mod players;
mod stats;

use axum::Router;
use axum::extract::OriginalUri;

use crate::error::AppError;
use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /health` — liveness with a database ping
/// - `/api/players`, `/api/matches` — CRUD
/// - `GET /api/stats` — aggregate statistics
pub fn router() -> Router<AppState> {
    let api = Router::new()
        .nest("/players", players::router())
        .nest("/matches", matches::router())
        .merge(stats::router())
        .fallback(api_not_found);

    Router::new().merge(health::router()).nest("/api", api)
}

async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("API route not found: {}", uri.path()))
}
