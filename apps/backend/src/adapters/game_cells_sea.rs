//! SeaORM adapter for game cells.

use sea_orm::prelude::Uuid;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::game_cells::{self, CellState};

/// Rows per INSERT and ids per `IN (...)`; keeps bind counts well under
/// the SQLite and Postgres parameter limits.
pub const BATCH_SIZE: usize = 500;

#[derive(Debug, Clone)]
pub struct CellCreate {
    pub x: i16,
    pub y: i16,
    pub is_mine: bool,
    pub neighbor_mine_count: i16,
}

pub async fn insert_cells<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
    cells: &[CellCreate],
) -> Result<u64, sea_orm::DbErr> {
    let mut inserted = 0u64;
    for chunk in cells.chunks(BATCH_SIZE) {
        let models = chunk.iter().map(|c| game_cells::ActiveModel {
            id: Set(Uuid::new_v4()),
            game_id: Set(game_id),
            x: Set(c.x),
            y: Set(c.y),
            is_mine: Set(c.is_mine),
            neighbor_mine_count: Set(c.neighbor_mine_count),
            status: Set(CellState::Hidden),
        });
        game_cells::Entity::insert_many(models)
            .exec_without_returning(conn)
            .await?;
        inserted += chunk.len() as u64;
    }
    Ok(inserted)
}

/// All cells of a game in row-major order.
pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Vec<game_cells::Model>, sea_orm::DbErr> {
    game_cells::Entity::find()
        .filter(game_cells::Column::GameId.eq(game_id))
        .order_by_asc(game_cells::Column::Y)
        .order_by_asc(game_cells::Column::X)
        .all(conn)
        .await
}

/// Write new statuses, one UPDATE per (status, batch).
pub async fn update_statuses<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
    updates: &[(Uuid, CellState)],
) -> Result<u64, sea_orm::DbErr> {
    let mut groups: Vec<(CellState, Vec<Uuid>)> = Vec::new();
    for &(id, state) in updates {
        match groups.iter_mut().find(|(s, _)| *s == state) {
            Some((_, ids)) => ids.push(id),
            None => groups.push((state, vec![id])),
        }
    }

    let mut affected = 0u64;
    for (state, ids) in groups {
        for chunk in ids.chunks(BATCH_SIZE) {
            let result = game_cells::Entity::update_many()
                .col_expr(game_cells::Column::Status, Expr::value(state))
                .filter(game_cells::Column::GameId.eq(game_id))
                .filter(game_cells::Column::Id.is_in(chunk.iter().copied()))
                .exec(conn)
                .await?;
            affected += result.rows_affected;
        }
    }

    if affected != updates.len() as u64 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "expected to update {} cells, updated {affected}",
            updates.len()
        )));
    }
    Ok(affected)
}
