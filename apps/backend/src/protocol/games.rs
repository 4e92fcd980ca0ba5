//! JSON shapes for the games API (camelCase on the wire).
//!
//! Mine identity and neighbor counts leave the server only for cells whose
//! status makes them public: `isMine` for `DETONATED` cells and
//! `neighboringMineCount` for `REVEALED` cells.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::state_machine::CellDelta;
use crate::domain::types::{CellStatus, GameStatus, MoveAction};
use crate::repos::game_cells::Cell;
use crate::repos::games::Game;
use crate::services::games::GameWithCells;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateGameRequest {
    pub rows: i64,
    pub columns: i64,
    #[serde(default)]
    pub mine_count: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MoveRequest {
    pub x: i64,
    pub y: i64,
    #[serde(default)]
    pub action: MoveAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub id: Uuid,
    pub rows: u16,
    pub columns: u16,
    pub status: GameStatus,
}

impl From<&Game> for GameSummary {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id,
            rows: game.rows,
            columns: game.columns,
            status: game.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub x: u16,
    pub y: u16,
    pub status: CellStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mine: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighboring_mine_count: Option<u8>,
}

impl CellView {
    /// Build a view exposing only what `status` allows.
    pub fn masked(x: u16, y: u16, status: CellStatus, is_mine: bool, neighbor_count: u8) -> Self {
        Self {
            x,
            y,
            status,
            is_mine: (status == CellStatus::Detonated).then_some(is_mine),
            neighboring_mine_count: (status == CellStatus::Revealed).then_some(neighbor_count),
        }
    }
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        Self::masked(
            cell.x,
            cell.y,
            cell.status,
            cell.is_mine,
            cell.neighbor_mine_count,
        )
    }
}

impl From<&CellDelta> for CellView {
    fn from(delta: &CellDelta) -> Self {
        Self::masked(
            delta.x,
            delta.y,
            delta.status,
            delta.is_mine,
            delta.neighbor_count,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    #[serde(flatten)]
    pub game: GameSummary,
    pub cells: Vec<CellView>,
}

impl From<&GameWithCells> for GameDetail {
    fn from(value: &GameWithCells) -> Self {
        Self {
            game: GameSummary::from(&value.game),
            cells: value.cells.iter().map(CellView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListResponse {
    pub data: Vec<GameSummary>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub game: GameSummary,
    pub updated_cells: Vec<CellView>,
}
