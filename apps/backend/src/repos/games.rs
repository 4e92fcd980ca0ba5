//! Game repository functions for the domain layer.

use sea_orm::prelude::Uuid;
use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;

use crate::adapters::games_sea as games_adapter;
use crate::domain::grid::GridSpec;
use crate::domain::types::GameStatus;
use crate::entities::games;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Game domain model, converted from `games::Model` when loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: Uuid,
    pub rows: u16,
    pub columns: u16,
    pub mine_count: u32,
    pub status: GameStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub version: i32,
}

impl Game {
    pub fn spec(&self) -> Result<GridSpec, DomainError> {
        GridSpec::new(self.rows, self.columns).map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!(
                    "game {} has degenerate dimensions {}x{}",
                    self.id, self.rows, self.columns
                ),
            )
        })
    }
}

impl TryFrom<games::Model> for Game {
    type Error = DomainError;

    fn try_from(model: games::Model) -> Result<Self, Self::Error> {
        let corrupt = |field: &str| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("game {} has invalid {field}", model.id),
            )
        };
        Ok(Self {
            id: model.id,
            rows: u16::try_from(model.rows).map_err(|_| corrupt("rows"))?,
            columns: u16::try_from(model.columns).map_err(|_| corrupt("columns"))?,
            mine_count: u32::try_from(model.mine_count).map_err(|_| corrupt("mine_count"))?,
            status: model.status.into(),
            created_at: model.created_at,
            updated_at: model.updated_at,
            version: model.version,
        })
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Option<Game>, DomainError> {
    games_adapter::find_by_id(conn, game_id)
        .await?
        .map(Game::try_from)
        .transpose()
}

/// Find game by ID; a missing row is `NotFound(Game)`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Game, DomainError> {
    Game::try_from(games_adapter::require_game(conn, game_id).await?)
}

/// Like [`require_game`], but holds the row lock for the rest of `txn`.
pub async fn lock_game(txn: &DatabaseTransaction, game_id: Uuid) -> Result<Game, DomainError> {
    Game::try_from(games_adapter::require_game_for_update(txn, game_id).await?)
}

pub async fn create_game(
    txn: &DatabaseTransaction,
    spec: GridSpec,
    mine_count: usize,
) -> Result<Game, DomainError> {
    let too_big = |what: &str| DomainError::validation_other(format!("{what} does not fit the store"));
    let rows = i16::try_from(spec.rows()).map_err(|_| too_big("rows"))?;
    let columns = i16::try_from(spec.columns()).map_err(|_| too_big("columns"))?;
    let mine_count = i32::try_from(mine_count).map_err(|_| too_big("mine count"))?;
    let model =
        games_adapter::create_game(txn, games_adapter::GameCreate::new(rows, columns, mine_count))
            .await?;
    Game::try_from(model)
}

/// Newest-first page and the total number of games.
pub async fn list_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
    offset: u64,
) -> Result<(Vec<Game>, u64), DomainError> {
    let (models, total) = games_adapter::list_page(conn, limit, offset).await?;
    let games = models
        .into_iter()
        .map(Game::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((games, total))
}

/// Version-checked status write; bumps `version` even if `status` is unchanged.
pub async fn update_status(
    txn: &DatabaseTransaction,
    game_id: Uuid,
    expected_version: i32,
    status: GameStatus,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameUpdateStatus::new(game_id, status.into(), expected_version);
    Game::try_from(games_adapter::update_status(txn, dto).await?)
}
