//! Flat, index-addressed view of one game's cells.
//!
//! Built from persisted rows at the start of a move and mutated in place by
//! the state machine. Cells know their row id for write-back but hold no
//! reference to the game.

use uuid::Uuid;

use super::grid::GridSpec;
use super::types::CellStatus;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// One persisted cell, positioned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCell {
    pub id: Uuid,
    pub x: i64,
    pub y: i64,
    pub is_mine: bool,
    pub neighbor_count: u8,
    pub status: CellStatus,
}

#[derive(Debug, Clone)]
pub struct Board {
    spec: GridSpec,
    ids: Vec<Uuid>,
    is_mine: Vec<bool>,
    neighbor_counts: Vec<u8>,
    statuses: Vec<CellStatus>,
    /// Non-mine cells whose status is anything but `Revealed`.
    unrevealed_safe: usize,
}

fn corruption(detail: String) -> DomainError {
    DomainError::infra(InfraErrorKind::DataCorruption, detail)
}

impl Board {
    /// Lay out `cells` by coordinate. Every position must appear exactly
    /// once; out-of-range, duplicate or missing positions are corruption.
    pub fn from_cells<I>(spec: GridSpec, cells: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = BoardCell>,
    {
        let total = spec.total_cells();
        let mut ids: Vec<Option<Uuid>> = vec![None; total];
        let mut is_mine = vec![false; total];
        let mut neighbor_counts = vec![0; total];
        let mut statuses = vec![CellStatus::Hidden; total];
        let mut unrevealed_safe = 0;

        for cell in cells {
            let index = spec.checked_index(cell.x, cell.y).ok_or_else(|| {
                corruption(format!("cell ({}, {}) lies outside the board", cell.x, cell.y))
            })?;
            if ids[index].is_some() {
                return Err(corruption(format!(
                    "duplicate cell at ({}, {})",
                    cell.x, cell.y
                )));
            }
            ids[index] = Some(cell.id);
            is_mine[index] = cell.is_mine;
            neighbor_counts[index] = cell.neighbor_count;
            statuses[index] = cell.status;
            if !cell.is_mine && cell.status != CellStatus::Revealed {
                unrevealed_safe += 1;
            }
        }

        let ids = ids
            .into_iter()
            .enumerate()
            .map(|(index, id)| {
                id.ok_or_else(|| {
                    let (x, y) = spec.coords(index);
                    corruption(format!("cell ({x}, {y}) is missing"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            spec,
            ids,
            is_mine,
            neighbor_counts,
            statuses,
            unrevealed_safe,
        })
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    pub fn id(&self, index: usize) -> Uuid {
        self.ids[index]
    }

    pub fn is_mine(&self, index: usize) -> bool {
        self.is_mine[index]
    }

    pub fn neighbor_count(&self, index: usize) -> u8 {
        self.neighbor_counts[index]
    }

    pub fn status(&self, index: usize) -> CellStatus {
        self.statuses[index]
    }

    pub fn mines(&self) -> &[bool] {
        &self.is_mine
    }

    pub fn neighbor_counts(&self) -> &[u8] {
        &self.neighbor_counts
    }

    /// True once every non-mine cell is `Revealed`.
    pub fn all_safe_revealed(&self) -> bool {
        self.unrevealed_safe == 0
    }

    pub(crate) fn set_status(&mut self, index: usize, status: CellStatus) {
        let before = self.statuses[index];
        if !self.is_mine[index] {
            if before != CellStatus::Revealed && status == CellStatus::Revealed {
                self.unrevealed_safe -= 1;
            } else if before == CellStatus::Revealed && status != CellStatus::Revealed {
                self.unrevealed_safe += 1;
            }
        }
        self.statuses[index] = status;
    }
}
