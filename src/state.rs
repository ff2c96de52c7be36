use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::repositories::{MatchRepository, PlayerRepository};
use crate::stats::StatsEngine;

/// Shared application state available to all request handlers via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
}

impl AppState {
    #[must_use]
    pub const fn players(&self) -> PlayerRepository<'_> {
        PlayerRepository::new(&self.db)
    }

    #[must_use]
    pub const fn matches(&self) -> MatchRepository<'_> {
        MatchRepository::new(&self.db)
    }

    #[must_use]
    pub const fn stats(&self) -> StatsEngine<'_> {
        StatsEngine::new(&self.db)
    }
}
