//! Persistence for players and matches.
//!
//! Repositories borrow the shared [`DatabaseConnection`](sea_orm::DatabaseConnection)
//! they are constructed with and return typed [`RepoError`]s; mapping those onto
//! HTTP responses is left to the route layer.

mod matches;
mod players;

pub use matches::{MatchInput, MatchRepository};
pub use players::PlayerRepository;

/// Errors from the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("invalid input: {0}")]
    InvalidArgument(String),
    #[error("player {0} does not exist")]
    ReferenceNotFound(i32),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("player {player_id} still has {matches} recorded match(es)")]
    PlayerInUse { player_id: i32, matches: u64 },
    #[error("store error: {0}")]
    Store(#[from] sea_orm::DbErr),
}

impl RepoError {
    pub(crate) const fn player_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "player",
            id,
        }
    }

    pub(crate) const fn match_not_found(id: i32) -> Self {
        Self::NotFound { entity: "match", id }
    }
}
