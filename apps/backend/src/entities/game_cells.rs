use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::types::CellStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CellState {
    #[sea_orm(string_value = "HIDDEN")]
    Hidden,
    #[sea_orm(string_value = "REVEALED")]
    Revealed,
    #[sea_orm(string_value = "FLAGGED")]
    Flagged,
    #[sea_orm(string_value = "DETONATED")]
    Detonated,
}

impl From<CellState> for CellStatus {
    fn from(s: CellState) -> Self {
        match s {
            CellState::Hidden => CellStatus::Hidden,
            CellState::Revealed => CellStatus::Revealed,
            CellState::Flagged => CellStatus::Flagged,
            CellState::Detonated => CellStatus::Detonated,
        }
    }
}

impl From<CellStatus> for CellState {
    fn from(s: CellStatus) -> Self {
        match s {
            CellStatus::Hidden => CellState::Hidden,
            CellStatus::Revealed => CellState::Revealed,
            CellStatus::Flagged => CellState::Flagged,
            CellStatus::Detonated => CellState::Detonated,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_cells")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_name = "game_id")]
    pub game_id: Uuid,
    #[sea_orm(column_type = "SmallInteger")]
    pub x: i16,
    #[sea_orm(column_type = "SmallInteger")]
    pub y: i16,
    #[sea_orm(column_name = "is_mine")]
    pub is_mine: bool,
    #[sea_orm(column_name = "neighbor_mine_count", column_type = "SmallInteger")]
    pub neighbor_mine_count: i16,
    pub status: CellState,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id",
        on_delete = "Cascade"
    )]
    Game,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
