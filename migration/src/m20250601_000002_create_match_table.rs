use sea_orm_migration::prelude::*;

/// Creates the `matches` table. Both sides reference `players`; deleting a
/// player that still has matches is rejected by the store.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Matches {
    Table,
    Id,
    PlayerAId,
    PlayerBId,
    ScoreA,
    ScoreB,
    PlayedAt,
}

#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Matches::PlayerAId).integer().not_null())
                    .col(ColumnDef::new(Matches::PlayerBId).integer().not_null())
                    .col(ColumnDef::new(Matches::ScoreA).integer().not_null())
                    .col(ColumnDef::new(Matches::ScoreB).integer().not_null())
                    .col(
                        ColumnDef::new(Matches::PlayedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_player_a_id")
                            .from(Matches::Table, Matches::PlayerAId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_player_b_id")
                            .from(Matches::Table, Matches::PlayerBId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Player history looks up either side
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_matches_player_a_id")
                    .table(Matches::Table)
                    .col(Matches::PlayerAId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_matches_player_b_id")
                    .table(Matches::Table)
                    .col(Matches::PlayerBId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await
    }
}
