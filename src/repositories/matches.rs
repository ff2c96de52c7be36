use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use super::{PlayerRepository, RepoError};
use crate::entities::matches;

/// Fields a caller supplies when recording or correcting a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchInput {
    pub player_a_id: i32,
    pub player_b_id: i32,
    pub score_a: i32,
    pub score_b: i32,
}

impl MatchInput {
    /// Checks that need no store access: positive player ids, non-negative scores.
    fn validate(&self) -> Result<(), RepoError> {
        if self.player_a_id <= 0 || self.player_b_id <= 0 {
            return Err(RepoError::InvalidArgument(
                "player IDs must be positive".to_string(),
            ));
        }
        if self.score_a < 0 || self.score_b < 0 {
            return Err(RepoError::InvalidArgument(
                "scores must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// CRUD over the `matches` table with referential checks against `players`.
pub struct MatchRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MatchRepository<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// # Errors
    ///
    /// Returns [`RepoError::Store`] if the query fails.
    pub async fn get_all(&self) -> Result<Vec<matches::Model>, RepoError> {
        let all = matches::Entity::find()
            .order_by_asc(matches::Column::Id)
            .all(self.db)
            .await?;
        Ok(all)
    }

    /// Matches where the player appears on either side.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::Store`] if the query fails.
    pub async fn get_by_player(&self, player_id: i32) -> Result<Vec<matches::Model>, RepoError> {
        let found = matches::Entity::find()
            .filter(
                Condition::any()
                    .add(matches::Column::PlayerAId.eq(player_id))
                    .add(matches::Column::PlayerBId.eq(player_id)),
            )
            .order_by_asc(matches::Column::Id)
            .all(self.db)
            .await?;
        Ok(found)
    }

    /// Record a match and return its id.
    ///
    /// Local checks run first, then each referenced player is looked up (side A before
    /// side B), and only then is the row written.
    ///
    /// # Errors
    ///
    /// [`RepoError::InvalidArgument`] for non-positive ids or negative scores,
    /// [`RepoError::ReferenceNotFound`] for the first missing player.
    pub async fn create(&self, input: MatchInput) -> Result<i32, RepoError> {
        self.check_references(&input).await?;

        let inserted = matches::ActiveModel {
            player_a_id: Set(input.player_a_id),
            player_b_id: Set(input.player_b_id),
            score_a: Set(input.score_a),
            score_b: Set(input.score_b),
            played_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        tracing::info!(
            match_id = inserted.id,
            player_a_id = inserted.player_a_id,
            player_b_id = inserted.player_b_id,
            score_a = inserted.score_a,
            score_b = inserted.score_b,
            "Match recorded"
        );
        Ok(inserted.id)
    }

    /// # Errors
    ///
    /// [`RepoError::NotFound`] if no match has this id.
    pub async fn get_by_id(&self, id: i32) -> Result<matches::Model, RepoError> {
        matches::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| RepoError::match_not_found(id))
    }

    /// Replace the players and scores of an existing match. `played_at` is kept.
    ///
    /// # Errors
    ///
    /// Same validation as [`Self::create`], plus [`RepoError::NotFound`] for an unknown id.
    pub async fn update(&self, id: i32, input: MatchInput) -> Result<matches::Model, RepoError> {
        self.check_references(&input).await?;
        let existing = self.get_by_id(id).await?;

        let mut active: matches::ActiveModel = existing.into();
        active.player_a_id = Set(input.player_a_id);
        active.player_b_id = Set(input.player_b_id);
        active.score_a = Set(input.score_a);
        active.score_b = Set(input.score_b);
        let updated = active.update(self.db).await?;

        tracing::info!(match_id = id, "Match updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// [`RepoError::NotFound`] if no match has this id.
    pub async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = matches::Entity::delete_by_id(id).exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepoError::match_not_found(id));
        }

        tracing::info!(match_id = id, "Match deleted");
        Ok(())
    }

    async fn check_references(&self, input: &MatchInput) -> Result<(), RepoError> {
        input.validate()?;

        let players = PlayerRepository::new(self.db);
        for player_id in [input.player_a_id, input.player_b_id] {
            if !players.exists(player_id).await? {
                return Err(RepoError::ReferenceNotFound(player_id));
            }
        }
        Ok(())
    }
}
