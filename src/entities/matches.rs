use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub player_a_id: i32,
    pub player_b_id: i32,
    pub score_a: i32,
    pub score_b: i32,
    pub played_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::PlayerAId",
        to = "super::players::Column::Id",
        on_delete = "Restrict"
    )]
    PlayerA,
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::PlayerBId",
        to = "super::players::Column::Id",
        on_delete = "Restrict"
    )]
    PlayerB,
}

impl ActiveModelBehavior for ActiveModel {}
