use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
};

use super::RepoError;
use crate::entities::{matches, players};

/// CRUD over the `players` table.
pub struct PlayerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PlayerRepository<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All players in id order.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::Store`] if the query fails.
    pub async fn get_all(&self) -> Result<Vec<players::Model>, RepoError> {
        let all = players::Entity::find()
            .order_by_asc(players::Column::Id)
            .all(self.db)
            .await?;
        Ok(all)
    }

    /// Insert a player and return the stored row, including its generated id and timestamp.
    ///
    /// # Errors
    ///
    /// [`RepoError::InvalidArgument`] if `name` is blank, [`RepoError::Store`] on write failure.
    pub async fn create(&self, name: &str) -> Result<players::Model, RepoError> {
        let name = validate_name(name)?;

        let player = players::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        tracing::info!(player_id = player.id, name = %player.name, "Player created");
        Ok(player)
    }

    /// # Errors
    ///
    /// [`RepoError::NotFound`] if no player has this id.
    pub async fn get_by_id(&self, id: i32) -> Result<players::Model, RepoError> {
        players::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| RepoError::player_not_found(id))
    }

    /// Whether a player with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::Store`] if the query fails.
    pub async fn exists(&self, id: i32) -> Result<bool, RepoError> {
        let count = players::Entity::find_by_id(id).count(self.db).await?;
        Ok(count > 0)
    }

    /// Rename a player. `created_at` is left untouched.
    ///
    /// # Errors
    ///
    /// [`RepoError::InvalidArgument`] for a blank name, [`RepoError::NotFound`] for an unknown id.
    pub async fn update(&self, id: i32, name: &str) -> Result<players::Model, RepoError> {
        let name = validate_name(name)?;
        let existing = self.get_by_id(id).await?;

        let mut active: players::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        let updated = active.update(self.db).await?;

        tracing::info!(player_id = id, name = %updated.name, "Player renamed");
        Ok(updated)
    }

    /// Delete a player that has no recorded matches.
    ///
    /// The foreign keys on `matches` reject the delete while the player is referenced;
    /// that rejection is reported as [`RepoError::PlayerInUse`].
    ///
    /// # Errors
    ///
    /// [`RepoError::NotFound`] for an unknown id, [`RepoError::PlayerInUse`] if any match
    /// still references the player.
    pub async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.get_by_id(id).await?;

        let result = match players::Entity::delete_by_id(id).exec(self.db).await {
            Ok(result) => result,
            Err(err) => {
                let referencing = self.referencing_matches(id).await?;
                if referencing > 0 || is_foreign_key_violation(&err) {
                    return Err(RepoError::PlayerInUse {
                        player_id: id,
                        matches: referencing,
                    });
                }
                return Err(err.into());
            }
        };
        if result.rows_affected == 0 {
            return Err(RepoError::player_not_found(id));
        }

        tracing::info!(player_id = id, "Player deleted");
        Ok(())
    }

    async fn referencing_matches(&self, id: i32) -> Result<u64, RepoError> {
        let count = matches::Entity::find()
            .filter(
                Condition::any()
                    .add(matches::Column::PlayerAId.eq(id))
                    .add(matches::Column::PlayerBId.eq(id)),
            )
            .count(self.db)
            .await?;
        Ok(count)
    }
}

fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

/// Trim the name and reject it if nothing is left.
fn validate_name(name: &str) -> Result<&str, RepoError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RepoError::InvalidArgument(
            "player name must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}
