//! SeaORM adapter for games - generic over ConnectionTrait.

use sea_orm::prelude::Uuid;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::games;
use crate::infra::db_errors::{GAME_NOT_FOUND_PREFIX, OPTIMISTIC_LOCK_PREFIX};

pub mod dto;

pub use dto::{GameCreate, GameUpdateStatus};

// Adapter functions return DbErr; repos map to DomainError via From<DbErr>.

fn game_not_found(id: Uuid) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!("{GAME_NOT_FOUND_PREFIX}{id}"))
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: Set(dto.id),
        rows: Set(dto.rows),
        columns: Set(dto.columns),
        mine_count: Set(dto.mine_count),
        status: Set(games::GameState::Active),
        created_at: Set(now),
        updated_at: Set(now),
        version: Set(0),
    };

    game_active.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Find game by ID or fail with a structured not-found error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| game_not_found(game_id))
}

/// Read the game row while holding an exclusive row lock until the
/// surrounding transaction ends. SQLite has no row locks; there a write
/// transaction already serializes writers.
pub async fn require_game_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<games::Model, sea_orm::DbErr> {
    let mut query = games::Entity::find_by_id(game_id);
    if conn.get_database_backend() == DatabaseBackend::Postgres {
        query = query.lock_exclusive();
    }
    query.one(conn).await?.ok_or_else(|| game_not_found(game_id))
}

/// One page of games, newest first, plus the total row count.
pub async fn list_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
    offset: u64,
) -> Result<(Vec<games::Model>, u64), sea_orm::DbErr> {
    let total = games::Entity::find().count(conn).await?;
    let page = games::Entity::find()
        .order_by_desc(games::Column::CreatedAt)
        .order_by_asc(games::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await?;
    Ok((page, total))
}

/// Apply a version-checked status update, then refetch.
///
/// `rows_affected == 0` means either the game is gone or someone else bumped
/// the version; a follow-up read tells the two apart.
pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdateStatus,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = games::Entity::update_many()
        .col_expr(games::Column::Status, Expr::value(dto.status))
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            games::Column::Version,
            Expr::col(games::Column::Version).add(1),
        )
        .filter(games::Column::Id.eq(dto.id))
        .filter(games::Column::Version.eq(dto.expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, dto.id).await? {
            Some(game) => Err(sea_orm::DbErr::Custom(format!(
                "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{},\"actual\":{}}}",
                dto.expected_version, game.version
            ))),
            None => Err(game_not_found(dto.id)),
        };
    }

    require_game(conn, dto.id).await
}
