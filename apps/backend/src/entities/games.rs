use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::types::GameStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum GameState {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "CLEARED")]
    Cleared,
    #[sea_orm(string_value = "DETONATED")]
    Detonated,
}

impl From<GameState> for GameStatus {
    fn from(s: GameState) -> Self {
        match s {
            GameState::Active => GameStatus::Active,
            GameState::Cleared => GameStatus::Cleared,
            GameState::Detonated => GameStatus::Detonated,
        }
    }
}

impl From<GameStatus> for GameState {
    fn from(s: GameStatus) -> Self {
        match s {
            GameStatus::Active => GameState::Active,
            GameStatus::Cleared => GameState::Cleared,
            GameStatus::Detonated => GameState::Detonated,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "SmallInteger")]
    pub rows: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub columns: i16,
    #[sea_orm(column_name = "mine_count")]
    pub mine_count: i32,
    pub status: GameState,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "version")]
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_cells::Entity")]
    GameCells,
}

impl Related<super::game_cells::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameCells.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
