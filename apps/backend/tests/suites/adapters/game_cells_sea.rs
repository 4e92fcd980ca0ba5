use backend::adapters::game_cells_sea::{self, CellCreate};
use backend::adapters::games_sea::{self, GameCreate};
use backend::db::require_db;
use backend::entities::game_cells::CellState;
use backend::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use backend::infra::db_errors::map_db_err;
use uuid::Uuid;

use crate::support::build_test_state;

fn grid(rows: i16, columns: i16) -> Vec<CellCreate> {
    (0..rows)
        .flat_map(|y| {
            (0..columns).map(move |x| CellCreate {
                x,
                y,
                is_mine: false,
                neighbor_mine_count: 0,
            })
        })
        .collect()
}

#[tokio::test]
async fn bulk_insert_spans_batches() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    // 30x30 exceeds one insert batch
    let game = games_sea::create_game(db, GameCreate::new(30, 30, 0)).await?;

    let inserted = game_cells_sea::insert_cells(db, game.id, &grid(30, 30)).await?;
    assert_eq!(inserted, 900);

    let cells = game_cells_sea::find_by_game(db, game.id).await?;
    assert_eq!(cells.len(), 900);
    assert_eq!((cells[0].x, cells[0].y), (0, 0));
    assert_eq!((cells[1].x, cells[1].y), (1, 0));
    assert_eq!((cells[899].x, cells[899].y), (29, 29));
    assert!(cells.iter().all(|c| c.status == CellState::Hidden));
    Ok(())
}

#[tokio::test]
async fn duplicate_coordinates_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let game = games_sea::create_game(db, GameCreate::new(2, 2, 0)).await?;
    game_cells_sea::insert_cells(db, game.id, &grid(2, 2)).await?;

    let err = game_cells_sea::insert_cells(db, game.id, &grid(1, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        map_db_err(err),
        DomainError::Conflict(ConflictKind::Other(ref k), _) if k == "Unique"
    ));
    Ok(())
}

#[tokio::test]
async fn cells_need_an_existing_game() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let err = game_cells_sea::insert_cells(db, Uuid::new_v4(), &grid(1, 2))
        .await
        .unwrap_err();
    assert!(matches!(
        map_db_err(err),
        DomainError::Validation(ValidationKind::Other(_), _)
    ));
    Ok(())
}

#[tokio::test]
async fn status_updates_are_grouped_and_counted() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let game = games_sea::create_game(db, GameCreate::new(2, 2, 0)).await?;
    game_cells_sea::insert_cells(db, game.id, &grid(2, 2)).await?;
    let cells = game_cells_sea::find_by_game(db, game.id).await?;

    let updates = vec![
        (cells[0].id, CellState::Revealed),
        (cells[1].id, CellState::Flagged),
        (cells[2].id, CellState::Revealed),
    ];
    let affected = game_cells_sea::update_statuses(db, game.id, &updates).await?;
    assert_eq!(affected, 3);

    let after = game_cells_sea::find_by_game(db, game.id).await?;
    let statuses: Vec<CellState> = after.iter().map(|c| c.status).collect();
    assert_eq!(
        statuses,
        vec![
            CellState::Revealed,
            CellState::Flagged,
            CellState::Revealed,
            CellState::Hidden
        ]
    );
    Ok(())
}

#[tokio::test]
async fn updating_a_foreign_cell_is_record_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let a = games_sea::create_game(db, GameCreate::new(2, 2, 0)).await?;
    let b = games_sea::create_game(db, GameCreate::new(2, 2, 0)).await?;
    game_cells_sea::insert_cells(db, a.id, &grid(2, 2)).await?;
    let cells = game_cells_sea::find_by_game(db, a.id).await?;

    let err = game_cells_sea::update_statuses(db, b.id, &[(cells[0].id, CellState::Revealed)])
        .await
        .unwrap_err();
    assert!(matches!(
        map_db_err(err),
        DomainError::NotFound(NotFoundKind::Other(ref k), _) if k == "Record"
    ));
    Ok(())
}
