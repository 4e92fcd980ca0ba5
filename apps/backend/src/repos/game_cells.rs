//! Cell repository functions for the domain layer.

use sea_orm::prelude::Uuid;
use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::game_cells_sea as cells_adapter;
use crate::domain::board::{Board, BoardCell};
use crate::domain::generator::MineLayout;
use crate::domain::grid::GridSpec;
use crate::domain::state_machine::CellDelta;
use crate::domain::types::CellStatus;
use crate::entities::game_cells;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Cell domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub id: Uuid,
    pub game_id: Uuid,
    pub x: u16,
    pub y: u16,
    pub is_mine: bool,
    pub neighbor_mine_count: u8,
    pub status: CellStatus,
}

impl TryFrom<game_cells::Model> for Cell {
    type Error = DomainError;

    fn try_from(model: game_cells::Model) -> Result<Self, Self::Error> {
        let corrupt = |field: &str| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("cell {} has invalid {field}", model.id),
            )
        };
        let neighbor_mine_count = u8::try_from(model.neighbor_mine_count)
            .ok()
            .filter(|n| *n <= 8)
            .ok_or_else(|| corrupt("neighbor_mine_count"))?;
        Ok(Self {
            id: model.id,
            game_id: model.game_id,
            x: u16::try_from(model.x).map_err(|_| corrupt("x"))?,
            y: u16::try_from(model.y).map_err(|_| corrupt("y"))?,
            is_mine: model.is_mine,
            neighbor_mine_count,
            status: model.status.into(),
        })
    }
}

impl From<&Cell> for BoardCell {
    fn from(cell: &Cell) -> Self {
        BoardCell {
            id: cell.id,
            x: i64::from(cell.x),
            y: i64::from(cell.y),
            is_mine: cell.is_mine,
            neighbor_count: cell.neighbor_mine_count,
            status: cell.status,
        }
    }
}

/// Persist one Hidden cell per board position of `layout`.
pub async fn insert_layout(
    txn: &DatabaseTransaction,
    game_id: Uuid,
    layout: &MineLayout,
) -> Result<u64, DomainError> {
    let spec = layout.spec();
    let mut cells = Vec::with_capacity(spec.total_cells());
    for i in 0..spec.total_cells() {
        let (x, y) = spec.coords(i);
        cells.push(cells_adapter::CellCreate {
            x: i16::try_from(x)
                .map_err(|_| DomainError::validation_other("x does not fit the store"))?,
            y: i16::try_from(y)
                .map_err(|_| DomainError::validation_other("y does not fit the store"))?,
            is_mine: layout.is_mine(i),
            neighbor_mine_count: i16::from(layout.neighbor_count(i)),
        });
    }
    Ok(cells_adapter::insert_cells(txn, game_id, &cells).await?)
}

pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Vec<Cell>, DomainError> {
    cells_adapter::find_by_game(conn, game_id)
        .await?
        .into_iter()
        .map(Cell::try_from)
        .collect()
}

/// Load every cell of a game into a [`Board`].
pub async fn load_board<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
    spec: GridSpec,
) -> Result<Board, DomainError> {
    let cells = find_by_game(conn, game_id).await?;
    Board::from_cells(spec, cells.iter().map(BoardCell::from))
}

/// Persist the status of each delta.
pub async fn apply_deltas(
    txn: &DatabaseTransaction,
    game_id: Uuid,
    deltas: &[CellDelta],
) -> Result<u64, DomainError> {
    if deltas.is_empty() {
        return Ok(0);
    }
    let updates: Vec<(Uuid, game_cells::CellState)> =
        deltas.iter().map(|d| (d.id, d.status.into())).collect();
    Ok(cells_adapter::update_statuses(txn, game_id, &updates).await?)
}
