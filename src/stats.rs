//! Aggregate statistics over the full match history.
//!
//! Every figure is recomputed from the `matches` and `players` tables on each call.
//! A match has a winner only when one score is strictly higher; draws never count
//! towards wins, the leaderboard or the biggest win. Ties between candidates are
//! resolved towards the lowest id (or the lowest score pair for the most common score).

use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryOrder, QuerySelect, Statement,
};
use serde::Serialize;

use crate::entities::{matches, players};
use crate::repositories::RepoError;

const RECENT_MATCHES: u64 = 5;
const LEADERBOARD_SIZE: u64 = 5;

/// Winner of each non-draw match, one row per match.
const WINNERS: &str = "SELECT CASE \
        WHEN score_a > score_b THEN player_a_id \
        WHEN score_b > score_a THEN player_b_id \
    END AS winner \
    FROM matches";

/// Point-in-time summary returned by `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub player_count: u64,
    pub match_count: u64,
    pub recent_matches: Vec<matches::Model>,
    pub most_active: Option<i32>,
    pub most_wins: Option<i32>,
    pub most_common_score: Option<CommonScore>,
    pub biggest_win: Option<BiggestWin>,
    pub average_score: f64,
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct LeaderboardEntry {
    pub player_id: i32,
    pub wins: i64,
}

/// An ordered `(score_a, score_b)` pair and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct CommonScore {
    pub score_a: i32,
    pub score_b: i32,
    pub frequency: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct BiggestWin {
    pub match_id: i32,
    pub margin: i32,
    pub winner: i32,
    pub loser: i32,
}

#[derive(FromQueryResult)]
struct PlayerAppearances {
    player_id: i32,
}

#[derive(FromQueryResult)]
struct AverageScore {
    average: Option<f64>,
}

/// Read-only aggregation over the shared connection.
pub struct StatsEngine<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatsEngine<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Build the full summary. An empty history yields zeroed and empty fields.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::Store`] if any of the underlying queries fails.
    pub async fn compute(&self) -> Result<StatsSummary, RepoError> {
        let player_count = players::Entity::find().count(self.db).await?;
        let match_count = matches::Entity::find().count(self.db).await?;

        let recent_matches = matches::Entity::find()
            .order_by_desc(matches::Column::PlayedAt)
            .order_by_desc(matches::Column::Id)
            .limit(RECENT_MATCHES)
            .all(self.db)
            .await?;

        let leaderboard = self.leaderboard().await?;
        let most_wins = leaderboard.first().map(|entry| entry.player_id);

        let summary = StatsSummary {
            player_count,
            match_count,
            recent_matches,
            most_active: self.most_active().await?,
            most_wins,
            most_common_score: self.most_common_score().await?,
            biggest_win: self.biggest_win().await?,
            average_score: self.average_score().await?,
            leaderboard,
        };

        tracing::debug!(
            player_count = summary.player_count,
            match_count = summary.match_count,
            "Computed stats summary"
        );
        Ok(summary)
    }

    fn statement(&self, sql: impl Into<String>) -> Statement {
        Statement::from_string(self.db.get_database_backend(), sql)
    }

    async fn most_active(&self) -> Result<Option<i32>, RepoError> {
        let sql = "SELECT player_id, COUNT(*) AS appearances FROM ( \
                SELECT player_a_id AS player_id FROM matches \
                UNION ALL \
                SELECT player_b_id AS player_id FROM matches \
            ) AS sides \
            GROUP BY player_id \
            ORDER BY appearances DESC, player_id ASC \
            LIMIT 1";
        let row = PlayerAppearances::find_by_statement(self.statement(sql))
            .one(self.db)
            .await?;
        Ok(row.map(|r| r.player_id))
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, RepoError> {
        let sql = format!(
            "SELECT winner AS player_id, COUNT(*) AS wins FROM ({WINNERS}) AS outcomes \
             WHERE winner IS NOT NULL \
             GROUP BY winner \
             ORDER BY wins DESC, player_id ASC \
             LIMIT {LEADERBOARD_SIZE}"
        );
        let rows = LeaderboardEntry::find_by_statement(self.statement(sql))
            .all(self.db)
            .await?;
        Ok(rows)
    }

    async fn most_common_score(&self) -> Result<Option<CommonScore>, RepoError> {
        let sql = "SELECT score_a, score_b, COUNT(*) AS frequency \
            FROM matches \
            GROUP BY score_a, score_b \
            ORDER BY frequency DESC, score_a ASC, score_b ASC \
            LIMIT 1";
        let row = CommonScore::find_by_statement(self.statement(sql))
            .one(self.db)
            .await?;
        Ok(row)
    }

    async fn biggest_win(&self) -> Result<Option<BiggestWin>, RepoError> {
        let sql = "SELECT id AS match_id, \
                ABS(score_a - score_b) AS margin, \
                CASE WHEN score_a > score_b THEN player_a_id ELSE player_b_id END AS winner, \
                CASE WHEN score_a > score_b THEN player_b_id ELSE player_a_id END AS loser \
            FROM matches \
            WHERE score_a <> score_b \
            ORDER BY margin DESC, match_id ASC \
            LIMIT 1";
        let row = BiggestWin::find_by_statement(self.statement(sql))
            .one(self.db)
            .await?;
        Ok(row)
    }

    async fn average_score(&self) -> Result<f64, RepoError> {
        let sql = "SELECT CAST(AVG(CAST(score_a AS BIGINT) + score_b) AS DOUBLE PRECISION) AS average FROM matches";
        let row = AverageScore::find_by_statement(self.statement(sql))
            .one(self.db)
            .await?;
        Ok(row.and_then(|r| r.average).unwrap_or(0.0))
    }
}
