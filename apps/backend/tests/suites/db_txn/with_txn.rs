use backend::db::require_db;
use backend::db::txn::with_txn;
use backend::db::txn_policy::{current, TxnPolicy};
use backend::domain::grid::GridSpec;
use backend::domain::types::MoveAction;
use backend::errors::ErrorCode;
use backend::repos::games;
use backend::services::games::GameService;
use backend::services::moves::{MoveCommand, MoveCoordinator};
use backend::AppError;
use tracing::debug;

use crate::support::test_state::build_fixed_state;

#[tokio::test]
async fn rollback_policy_discards_successful_writes() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(current(), TxnPolicy::RollbackOnOk);

    let state = build_fixed_state(&[0]).await?;
    let spec = GridSpec::new(2, 2)?;
    let mines = state.mine_source.clone();

    let created = with_txn(&state, |txn| {
        Box::pin(async move {
            let created = GameService::new()
                .create_game(txn, spec, None, 0.15, mines.as_ref())
                .await?;
            // visible inside the transaction
            let seen = games::find_by_id(txn, created.game.id).await?;
            assert!(seen.is_some());
            Ok(created)
        })
    })
    .await?;
    debug!(game_id = %created.game.id, "closure returned ok");

    let db = require_db(&state)?;
    assert!(games::find_by_id(db, created.game.id).await?.is_none());
    let (_, total) = games::list_page(db, 10, 0).await?;
    assert_eq!(total, 0);
    Ok(())
}

#[tokio::test]
async fn errors_roll_back_and_surface_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let spec = GridSpec::new(2, 2)?;
    let mines = state.mine_source.clone();

    let result: Result<(), AppError> = with_txn(&state, |txn| {
        Box::pin(async move {
            GameService::new()
                .create_game(txn, spec, None, 0.15, mines.as_ref())
                .await?;
            Err(AppError::internal("forced failure"))
        })
    })
    .await;
    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Internal);

    let db = require_db(&state)?;
    let (_, total) = games::list_page(db, 10, 0).await?;
    assert_eq!(total, 0);
    Ok(())
}

#[tokio::test]
async fn failed_move_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let err = MoveCoordinator::new()
        .apply(
            &state,
            uuid::Uuid::new_v4(),
            MoveCommand {
                x: 0,
                y: 0,
                action: MoveAction::Flag,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotFound);
    assert!(state.game_locks.is_empty());
    Ok(())
}
