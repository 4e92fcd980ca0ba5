use std::sync::Arc;

use backend::db::require_db;
use backend::db::txn::with_txn;
use backend::domain::generator::{compute_mine_count, SeededMines, DEFAULT_MINE_RATIO};
use backend::domain::grid::GridSpec;
use backend::domain::types::{CellStatus, GameStatus};
use backend::errors::domain::{DomainError, NotFoundKind};
use backend::services::games::{GameService, GameWithCells};
use backend::state::app_state::AppState;
use backend::AppError;
use uuid::Uuid;

use crate::support::test_state::{build_fixed_state, build_test_state_with_mines};

async fn create(
    state: &AppState,
    rows: u16,
    columns: u16,
    requested: Option<u32>,
) -> Result<GameWithCells, AppError> {
    let spec = GridSpec::new(rows, columns)?;
    let ratio = state.limits.default_mine_ratio;
    let mines = state.mine_source.clone();
    with_txn(state, |txn| {
        Box::pin(async move {
            Ok(GameService::new()
                .create_game(txn, spec, requested, ratio, mines.as_ref())
                .await?)
        })
    })
    .await
}

#[tokio::test]
async fn create_persists_every_cell_hidden() -> Result<(), Box<dyn std::error::Error>> {
    // 3 rows x 4 columns, mines at (0,0) and (1,1)
    let state = build_fixed_state(&[0, 5]).await?;
    let created = create(&state, 3, 4, None).await?;

    assert_eq!(created.game.status, GameStatus::Active);
    assert_eq!(created.game.rows, 3);
    assert_eq!(created.game.columns, 4);
    assert_eq!(created.game.mine_count, 2);
    assert_eq!(created.game.version, 0);
    assert_eq!(created.cells.len(), 12);
    assert!(created.cells.iter().all(|c| c.status == CellStatus::Hidden));
    assert_eq!(created.cells.iter().filter(|c| c.is_mine).count(), 2);

    let at = |x: u16, y: u16| {
        created
            .cells
            .iter()
            .find(|c| c.x == x && c.y == y)
            .unwrap_or_else(|| panic!("cell ({x}, {y}) missing"))
    };
    assert!(at(0, 0).is_mine);
    assert!(at(1, 1).is_mine);
    assert_eq!(at(1, 0).neighbor_mine_count, 2);
    assert_eq!(at(2, 2).neighbor_mine_count, 1);
    assert_eq!(at(3, 2).neighbor_mine_count, 0);
    Ok(())
}

#[tokio::test]
async fn cells_come_back_in_row_major_order() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[]).await?;
    let created = create(&state, 2, 3, None).await?;

    let coords: Vec<(u16, u16)> = created.cells.iter().map(|c| (c.x, c.y)).collect();
    assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    Ok(())
}

#[tokio::test]
async fn requested_mine_count_is_clamped_to_leave_a_safe_cell(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state_with_mines(Arc::new(SeededMines::new(7))).await?;
    let created = create(&state, 2, 2, Some(100)).await?;

    assert_eq!(created.game.mine_count, 3);
    assert_eq!(created.cells.iter().filter(|c| c.is_mine).count(), 3);
    Ok(())
}

#[tokio::test]
async fn default_mine_count_follows_ratio() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state_with_mines(Arc::new(SeededMines::new(11))).await?;
    let created = create(&state, 10, 10, None).await?;

    let expected = compute_mine_count(100, None, DEFAULT_MINE_RATIO);
    assert_eq!(created.game.mine_count as usize, expected);
    assert_eq!(created.cells.iter().filter(|c| c.is_mine).count(), expected);
    Ok(())
}

#[tokio::test]
async fn unknown_game_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let db = require_db(&state)?;

    let err = GameService::new()
        .get_game_with_cells(db, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    Ok(())
}

#[tokio::test]
async fn list_pages_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(create(&state, 2, 2, None).await?.game.id);
    }
    let db = require_db(&state)?;
    let service = GameService::new();

    let (first, total) = service.list_games(db, 2, 0).await?;
    assert_eq!(total, 3);
    assert_eq!(first.len(), 2);

    let (rest, total) = service.list_games(db, 2, 2).await?;
    assert_eq!(total, 3);
    assert_eq!(rest.len(), 1);

    let mut seen: Vec<Uuid> = first.iter().chain(rest.iter()).map(|g| g.id).collect();
    seen.sort();
    ids.sort();
    assert_eq!(seen, ids, "pages must cover every game exactly once");

    let (empty, total) = service.list_games(db, 2, 10).await?;
    assert!(empty.is_empty());
    assert_eq!(total, 3);
    Ok(())
}
