//! Serialized, all-or-nothing application of player moves.

use tracing::{debug, info};
use uuid::Uuid;

use crate::db::txn::with_txn;
use crate::domain::state_machine::{apply_move, CellDelta, MoveOutcome};
use crate::domain::types::MoveAction;
use crate::error::AppError;
use crate::repos::game_cells;
use crate::repos::games::{self, Game};
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCommand {
    pub x: i64,
    pub y: i64,
    pub action: MoveAction,
}

/// Game after the move plus the cells it changed (empty for no-ops).
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub game: Game,
    pub updated: Vec<CellDelta>,
}

/// Applies moves one game at a time.
///
/// A move first takes the in-process hold for its game (bounded by
/// `limits.move_lock_timeout`), then opens a transaction, re-reads the game
/// row under an exclusive lock, re-reads the cells, runs the state machine
/// and writes every delta plus the game's new status and version before
/// committing. Any failure rolls the whole move back.
#[derive(Debug, Default)]
pub struct MoveCoordinator;

impl MoveCoordinator {
    pub fn new() -> Self {
        Self
    }

    pub async fn apply(
        &self,
        state: &AppState,
        game_id: Uuid,
        cmd: MoveCommand,
    ) -> Result<MoveResult, AppError> {
        let _hold = state
            .game_locks
            .acquire(game_id, state.limits.move_lock_timeout)
            .await?;

        let result = with_txn(state, |txn| {
            Box::pin(async move {
                let game = games::lock_game(txn, game_id).await?;
                let mut board = game_cells::load_board(txn, game_id, game.spec()?).await?;

                match apply_move(game.status, &mut board, cmd.x, cmd.y, cmd.action)? {
                    MoveOutcome::NoOp => Ok(MoveResult {
                        game,
                        updated: Vec::new(),
                    }),
                    MoveOutcome::Applied {
                        updated,
                        game_status,
                    } => {
                        game_cells::apply_deltas(txn, game_id, &updated).await?;
                        let game =
                            games::update_status(txn, game_id, game.version, game_status).await?;
                        Ok(MoveResult { game, updated })
                    }
                }
            })
        })
        .await?;

        if result.updated.is_empty() {
            debug!(
                game_id = %game_id,
                action = %cmd.action,
                x = cmd.x,
                y = cmd.y,
                "move was a no-op"
            );
        } else {
            info!(
                game_id = %game_id,
                action = %cmd.action,
                x = cmd.x,
                y = cmd.y,
                updated = result.updated.len(),
                status = %result.game.status,
                version = result.game.version,
                "move applied"
            );
        }
        Ok(result)
    }
}
