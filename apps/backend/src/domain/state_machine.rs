//! Move application: per-cell transitions and terminal game conditions.
//!
//! Cell: `Hidden -> {Revealed, Flagged}`, `Flagged -> Hidden`,
//! `Revealed` and `Detonated` are sinks.
//! Game: `Active -> {Active, Cleared, Detonated}`; the latter two are sinks.

use uuid::Uuid;

use super::board::Board;
use super::reveal::reveal_mask;
use super::types::{CellStatus, GameStatus, MoveAction};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// A single cell whose status changed during a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDelta {
    pub id: Uuid,
    pub x: u16,
    pub y: u16,
    pub status: CellStatus,
    pub is_mine: bool,
    pub neighbor_count: u8,
}

/// Result of a move that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Target already in the requested state; nothing to persist.
    NoOp,
    Applied {
        updated: Vec<CellDelta>,
        game_status: GameStatus,
    },
}

impl MoveOutcome {
    pub fn updated(&self) -> &[CellDelta] {
        match self {
            MoveOutcome::NoOp => &[],
            MoveOutcome::Applied { updated, .. } => updated,
        }
    }
}

/// Apply `action` at `(x, y)` to `board`, mutating it on success.
///
/// Checks run in order: game active, coordinates in bounds, then the
/// per-action transition rules.
pub fn apply_move(
    game_status: GameStatus,
    board: &mut Board,
    x: i64,
    y: i64,
    action: MoveAction,
) -> Result<MoveOutcome, DomainError> {
    if game_status != GameStatus::Active {
        return Err(DomainError::conflict(
            ConflictKind::GameNotActive,
            format!("game is {game_status}; no further moves are accepted"),
        ));
    }

    let spec = board.spec();
    let Some(target) = spec.checked_index(x, y) else {
        return Err(DomainError::validation(
            ValidationKind::OutOfBounds,
            format!(
                "coordinates ({x}, {y}) are outside the {}x{} board",
                spec.columns(),
                spec.rows()
            ),
        ));
    };

    let current = board.status(target);
    match action {
        MoveAction::Flag => match current {
            CellStatus::Flagged => Ok(MoveOutcome::NoOp),
            CellStatus::Hidden => {
                let delta = transition(board, target, CellStatus::Flagged);
                Ok(MoveOutcome::Applied {
                    updated: vec![delta],
                    game_status,
                })
            }
            other => Err(DomainError::invalid_transition(action, other)),
        },
        MoveAction::Unflag => match current {
            CellStatus::Hidden => Ok(MoveOutcome::NoOp),
            CellStatus::Flagged => {
                let delta = transition(board, target, CellStatus::Hidden);
                Ok(MoveOutcome::Applied {
                    updated: vec![delta],
                    game_status,
                })
            }
            other => Err(DomainError::invalid_transition(action, other)),
        },
        MoveAction::Reveal => match current {
            CellStatus::Revealed => Ok(MoveOutcome::NoOp),
            CellStatus::Hidden => reveal(board, target),
            other => Err(DomainError::invalid_transition(action, other)),
        },
    }
}

fn reveal(board: &mut Board, target: usize) -> Result<MoveOutcome, DomainError> {
    if board.is_mine(target) {
        let delta = transition(board, target, CellStatus::Detonated);
        return Ok(MoveOutcome::Applied {
            updated: vec![delta],
            game_status: GameStatus::Detonated,
        });
    }

    let spec = board.spec();
    let (x, y) = spec.coords(target);
    let mask = reveal_mask(
        spec,
        board.mines(),
        board.neighbor_counts(),
        i64::from(x),
        i64::from(y),
    );

    let hits: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter_map(|(i, &hit)| hit.then_some(i))
        .collect();

    let mut updated = Vec::with_capacity(hits.len());
    for index in hits {
        if board.status(index) == CellStatus::Hidden && !board.is_mine(index) {
            updated.push(transition(board, index, CellStatus::Revealed));
        }
    }

    let game_status = if board.all_safe_revealed() {
        GameStatus::Cleared
    } else {
        GameStatus::Active
    };

    Ok(MoveOutcome::Applied {
        updated,
        game_status,
    })
}

fn transition(board: &mut Board, index: usize, status: CellStatus) -> CellDelta {
    board.set_status(index, status);
    let (x, y) = board.spec().coords(index);
    CellDelta {
        id: board.id(index),
        x,
        y,
        status,
        is_mine: board.is_mine(index),
        neighbor_count: board.neighbor_count(index),
    }
}
