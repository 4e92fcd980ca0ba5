use std::sync::Arc;

use backend::db::txn::with_txn;
use backend::domain::grid::GridSpec;
use backend::domain::types::{GameStatus, MoveAction};
use backend::services::games::GameService;
use backend::services::moves::{MoveCommand, MoveCoordinator};
use backend::state::app_state::AppState;

use crate::support::test_state::build_fixed_state;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_final_reveals_clear_exactly_once() -> Result<(), Box<dyn std::error::Error>> {
    // 2x2 with the mine at (0,0): three safe cells
    let state = Arc::new(build_fixed_state(&[0]).await?);
    let spec = GridSpec::new(2, 2)?;
    let mines = state.mine_source.clone();
    let created = with_txn(&state, |txn| {
        Box::pin(async move {
            Ok(GameService::new()
                .create_game(txn, spec, None, 0.15, mines.as_ref())
                .await?)
        })
    })
    .await?;
    let id = created.game.id;

    let reveal = |x, y| MoveCommand {
        x,
        y,
        action: MoveAction::Reveal,
    };
    MoveCoordinator::new()
        .apply(&state, id, reveal(1, 1))
        .await?;

    let spawn = |state: Arc<AppState>, cmd: MoveCommand| {
        tokio::spawn(async move { MoveCoordinator::new().apply(&state, id, cmd).await })
    };
    let a = spawn(Arc::clone(&state), reveal(1, 0));
    let b = spawn(Arc::clone(&state), reveal(0, 1));
    let results = [a.await??, b.await??];

    let cleared = results
        .iter()
        .filter(|r| r.game.status == GameStatus::Cleared)
        .count();
    assert_eq!(cleared, 1, "exactly one move observes the clearing");
    assert!(results.iter().all(|r| r.updated.len() == 1));

    let mut versions: Vec<i32> = results.iter().map(|r| r.game.version).collect();
    versions.sort();
    assert_eq!(versions, vec![2, 3], "moves were applied one after the other");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_moves_on_one_game_all_land() -> Result<(), Box<dyn std::error::Error>> {
    // flags touch a single cell each, so every move is its own write
    let state = Arc::new(build_fixed_state(&[0]).await?);
    let spec = GridSpec::new(4, 4)?;
    let mines = state.mine_source.clone();
    let created = with_txn(&state, |txn| {
        Box::pin(async move {
            Ok(GameService::new()
                .create_game(txn, spec, None, 0.15, mines.as_ref())
                .await?)
        })
    })
    .await?;
    let id = created.game.id;

    let handles: Vec<_> = (1..4i64)
        .flat_map(|x| (0..4i64).map(move |y| (x, y)))
        .map(|(x, y)| {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                MoveCoordinator::new()
                    .apply(
                        &state,
                        id,
                        MoveCommand {
                            x,
                            y,
                            action: MoveAction::Flag,
                        },
                    )
                    .await
            })
        })
        .collect();

    let mut max_version = 0;
    for h in handles {
        let result = h.await??;
        assert_eq!(result.updated.len(), 1);
        max_version = max_version.max(result.game.version);
    }
    assert_eq!(max_version, 12);
    assert!(state.game_locks.is_empty());
    Ok(())
}
