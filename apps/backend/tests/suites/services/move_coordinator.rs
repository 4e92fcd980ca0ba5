use std::time::Duration;

use backend::config::game_limits::GameLimits;
use backend::db::require_db;
use backend::db::txn::with_txn;
use backend::domain::grid::GridSpec;
use backend::domain::types::{CellStatus, GameStatus, MoveAction};
use backend::entities::game_cells;
use backend::errors::ErrorCode;
use backend::services::games::GameService;
use backend::services::moves::{MoveCommand, MoveCoordinator, MoveResult};
use backend::state::app_state::AppState;
use backend::AppError;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::support::test_state::{build_fixed_state, build_fixed_state_with_limits};

async fn new_game(state: &AppState, rows: u16, columns: u16) -> Result<Uuid, AppError> {
    let spec = GridSpec::new(rows, columns)?;
    let mines = state.mine_source.clone();
    let created = with_txn(state, |txn| {
        Box::pin(async move {
            Ok(GameService::new()
                .create_game(txn, spec, None, 0.15, mines.as_ref())
                .await?)
        })
    })
    .await?;
    Ok(created.game.id)
}

async fn play(
    state: &AppState,
    game_id: Uuid,
    x: i64,
    y: i64,
    action: MoveAction,
) -> Result<MoveResult, AppError> {
    MoveCoordinator::new()
        .apply(state, game_id, MoveCommand { x, y, action })
        .await
}

async fn stored_status(state: &AppState, game_id: Uuid, x: u16, y: u16) -> CellStatus {
    let db = require_db(state).unwrap();
    let game = GameService::new()
        .get_game_with_cells(db, game_id)
        .await
        .unwrap();
    game.cells
        .iter()
        .find(|c| c.x == x && c.y == y)
        .map(|c| c.status)
        .unwrap_or_else(|| panic!("cell ({x}, {y}) missing"))
}

#[tokio::test]
async fn reveal_numbered_cell_reveals_only_it() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let id = new_game(&state, 3, 3).await?;

    let result = play(&state, id, 1, 1, MoveAction::Reveal).await?;
    assert_eq!(result.updated.len(), 1);
    let delta = result.updated[0];
    assert_eq!((delta.x, delta.y), (1, 1));
    assert_eq!(delta.status, CellStatus::Revealed);
    assert_eq!(delta.neighbor_count, 1);
    assert_eq!(result.game.status, GameStatus::Active);
    assert_eq!(result.game.version, 1);

    assert_eq!(stored_status(&state, id, 1, 1).await, CellStatus::Revealed);
    assert_eq!(stored_status(&state, id, 2, 2).await, CellStatus::Hidden);
    Ok(())
}

#[tokio::test]
async fn flood_fill_clears_the_board() -> Result<(), Box<dyn std::error::Error>> {
    // only mine is the top-left corner; the opposite corner floods everything
    let state = build_fixed_state(&[0]).await?;
    let id = new_game(&state, 3, 3).await?;

    let result = play(&state, id, 2, 2, MoveAction::Reveal).await?;
    assert_eq!(result.updated.len(), 8);
    assert!(result.updated.iter().all(|d| !d.is_mine));
    assert_eq!(result.game.status, GameStatus::Cleared);

    assert_eq!(stored_status(&state, id, 0, 0).await, CellStatus::Hidden);
    assert_eq!(stored_status(&state, id, 1, 0).await, CellStatus::Revealed);
    Ok(())
}

#[tokio::test]
async fn revealing_a_mine_detonates_and_ends_the_game() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_fixed_state(&[4]).await?;
    let id = new_game(&state, 3, 3).await?;

    let result = play(&state, id, 1, 1, MoveAction::Reveal).await?;
    assert_eq!(result.game.status, GameStatus::Detonated);
    assert_eq!(result.updated.len(), 1);
    assert!(result.updated[0].is_mine);
    assert_eq!(result.updated[0].status, CellStatus::Detonated);

    let err = play(&state, id, 0, 0, MoveAction::Reveal).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotActive);

    let err = play(&state, id, 0, 0, MoveAction::Flag).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotActive);
    Ok(())
}

#[tokio::test]
async fn flag_cycle_and_noops() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let id = new_game(&state, 3, 3).await?;

    let flagged = play(&state, id, 2, 2, MoveAction::Flag).await?;
    assert_eq!(flagged.updated.len(), 1);
    assert_eq!(flagged.updated[0].status, CellStatus::Flagged);
    assert_eq!(flagged.game.version, 1);

    // flagging twice changes nothing, including the version
    let again = play(&state, id, 2, 2, MoveAction::Flag).await?;
    assert!(again.updated.is_empty());
    assert_eq!(again.game.version, 1);

    let err = play(&state, id, 2, 2, MoveAction::Reveal).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidCellTransition);
    assert_eq!(stored_status(&state, id, 2, 2).await, CellStatus::Flagged);

    let unflagged = play(&state, id, 2, 2, MoveAction::Unflag).await?;
    assert_eq!(unflagged.updated[0].status, CellStatus::Hidden);
    assert_eq!(unflagged.game.version, 2);

    let noop = play(&state, id, 2, 2, MoveAction::Unflag).await?;
    assert!(noop.updated.is_empty());
    Ok(())
}

#[tokio::test]
async fn revealed_cells_reject_flags() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let id = new_game(&state, 3, 3).await?;

    play(&state, id, 1, 1, MoveAction::Reveal).await?;
    let err = play(&state, id, 1, 1, MoveAction::Flag).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidCellTransition);

    let noop = play(&state, id, 1, 1, MoveAction::Reveal).await?;
    assert!(noop.updated.is_empty());
    assert_eq!(noop.game.version, 1);
    Ok(())
}

#[tokio::test]
async fn flagged_safe_cell_blocks_clearing() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let id = new_game(&state, 2, 2).await?;

    play(&state, id, 1, 0, MoveAction::Flag).await?;
    play(&state, id, 1, 1, MoveAction::Reveal).await?;
    let last = play(&state, id, 0, 1, MoveAction::Reveal).await?;
    assert_eq!(last.game.status, GameStatus::Active);

    play(&state, id, 1, 0, MoveAction::Unflag).await?;
    let done = play(&state, id, 1, 0, MoveAction::Reveal).await?;
    assert_eq!(done.game.status, GameStatus::Cleared);
    Ok(())
}

#[tokio::test]
async fn out_of_bounds_and_unknown_game() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let id = new_game(&state, 2, 2).await?;

    for (x, y) in [(2, 0), (0, 2), (-1, 0), (0, -1)] {
        let err = play(&state, id, x, y, MoveAction::Reveal).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCoordinates, "({x}, {y})");
    }

    let err = play(&state, Uuid::new_v4(), 0, 0, MoveAction::Reveal)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotFound);
    Ok(())
}

#[tokio::test]
async fn held_game_lock_times_out_as_busy() -> Result<(), Box<dyn std::error::Error>> {
    let limits = GameLimits {
        move_lock_timeout: Duration::from_millis(50),
        ..GameLimits::default()
    };
    let state = build_fixed_state_with_limits(&[0], limits).await?;
    let id = new_game(&state, 2, 2).await?;

    let held = state.game_locks.acquire(id, Duration::from_secs(1)).await?;
    let err = play(&state, id, 1, 1, MoveAction::Reveal).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameBusy);
    drop(held);

    // nothing was written while busy
    assert_eq!(stored_status(&state, id, 1, 1).await, CellStatus::Hidden);
    let ok = play(&state, id, 1, 1, MoveAction::Reveal).await?;
    assert_eq!(ok.game.version, 1);
    Ok(())
}

#[tokio::test]
async fn missing_cell_row_rejects_every_move() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let id = new_game(&state, 3, 3).await?;

    let db = require_db(&state)?;
    game_cells::Entity::delete_many()
        .filter(game_cells::Column::GameId.eq(id))
        .filter(game_cells::Column::X.eq(0))
        .filter(game_cells::Column::Y.eq(2))
        .exec(db)
        .await?;

    // the target itself is intact; the board as a whole is not
    for action in [MoveAction::Flag, MoveAction::Reveal] {
        let err = play(&state, id, 2, 2, action).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DataCorruption);
    }

    let game = GameService::new().get_game(db, id).await?;
    assert_eq!(game.version, 0);
    assert_eq!(stored_status(&state, id, 2, 2).await, CellStatus::Hidden);
    Ok(())
}
