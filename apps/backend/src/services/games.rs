//! Game creation and read-side services.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::info;
use uuid::Uuid;

use crate::domain::generator::MineSource;
use crate::domain::grid::GridSpec;
use crate::errors::domain::DomainError;
use crate::repos::game_cells::{self, Cell};
use crate::repos::games::{self, Game};

/// A game together with its full, row-major cell set.
#[derive(Debug, Clone)]
pub struct GameWithCells {
    pub game: Game,
    pub cells: Vec<Cell>,
}

/// Game domain service.
#[derive(Debug, Default)]
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    /// Generate a layout and persist the game with every cell in `txn`.
    ///
    /// `requested` is the caller's mine count, if any; it is clamped so at
    /// least one safe cell remains. Without it the count derives from `ratio`.
    pub async fn create_game(
        &self,
        txn: &DatabaseTransaction,
        spec: GridSpec,
        requested: Option<u32>,
        ratio: f64,
        mines: &dyn MineSource,
    ) -> Result<GameWithCells, DomainError> {
        let layout = mines.layout(spec, requested, ratio);
        let game = games::create_game(txn, spec, layout.mine_count()).await?;
        let inserted = game_cells::insert_layout(txn, game.id, &layout).await?;
        let cells = game_cells::find_by_game(txn, game.id).await?;

        info!(
            game_id = %game.id,
            rows = spec.rows(),
            columns = spec.columns(),
            mine_count = layout.mine_count(),
            cells = inserted,
            "game created"
        );
        Ok(GameWithCells { game, cells })
    }

    /// One page of games, newest first, and the total count.
    pub async fn list_games<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<Game>, u64), DomainError> {
        games::list_page(conn, limit, offset).await
    }

    pub async fn get_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: Uuid,
    ) -> Result<Game, DomainError> {
        games::require_game(conn, game_id).await
    }

    pub async fn get_game_with_cells<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: Uuid,
    ) -> Result<GameWithCells, DomainError> {
        let game = games::require_game(conn, game_id).await?;
        let cells = game_cells::find_by_game(conn, game_id).await?;
        Ok(GameWithCells { game, cells })
    }
}
