//! Game HTTP routes.

use actix_web::{web, HttpResponse, Result};

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::game_id::GameId;
use crate::extractors::pagination::Pagination;
use crate::extractors::validated_json::ValidatedJson;
use crate::protocol::games::{
    CellView, CreateGameRequest, GameDetail, GameListResponse, GameSummary, MoveRequest,
    MoveResponse,
};
use crate::services::games::GameService;
use crate::services::moves::{MoveCommand, MoveCoordinator};
use crate::state::app_state::AppState;

fn requested_mine_count(raw: Option<i64>) -> Result<Option<u32>, AppError> {
    match raw {
        None => Ok(None),
        Some(n) if n < 0 => Err(AppError::invalid(
            ErrorCode::InvalidMineCount,
            format!("mineCount must not be negative (got {n})"),
        )),
        // anything above the board size is clamped later anyway
        Some(n) => Ok(Some(u32::try_from(n).unwrap_or(u32::MAX))),
    }
}

/// POST /api/games
///
/// Creates a game and its full cell set atomically. Returns 201 with the
/// masked board.
async fn create_game(
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateGameRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let spec = app_state.limits.grid_spec(req.rows, req.columns)?;
    let requested = requested_mine_count(req.mine_count)?;
    let ratio = app_state.limits.default_mine_ratio;
    let mines = app_state.mine_source.clone();

    let created = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let service = GameService::new();
            Ok(service
                .create_game(txn, spec, requested, ratio, mines.as_ref())
                .await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(GameDetail::from(&created)))
}

/// GET /api/games?limit=&offset=
async fn list_games(
    app_state: web::Data<AppState>,
    page: Pagination,
) -> Result<web::Json<GameListResponse>, AppError> {
    let db = require_db(&app_state)?;
    let (games, total) = GameService::new()
        .list_games(db, page.limit, page.offset)
        .await?;

    Ok(web::Json(GameListResponse {
        data: games.iter().map(GameSummary::from).collect(),
        total,
        limit: page.limit,
        offset: page.offset,
    }))
}

/// GET /api/games/{game_id}
async fn get_game(
    app_state: web::Data<AppState>,
    game_id: GameId,
) -> Result<web::Json<GameDetail>, AppError> {
    let db = require_db(&app_state)?;
    let game = GameService::new()
        .get_game_with_cells(db, game_id.0)
        .await?;
    Ok(web::Json(GameDetail::from(&game)))
}

/// POST /api/games/{game_id}/moves
///
/// Applies one move. No-op moves answer 200 with an empty `updatedCells`.
async fn make_move(
    app_state: web::Data<AppState>,
    game_id: GameId,
    body: ValidatedJson<MoveRequest>,
) -> Result<web::Json<MoveResponse>, AppError> {
    let req = body.into_inner();
    let cmd = MoveCommand {
        x: req.x,
        y: req.y,
        action: req.action,
    };

    let result = MoveCoordinator::new()
        .apply(&app_state, game_id.0, cmd)
        .await?;

    Ok(web::Json(MoveResponse {
        game: GameSummary::from(&result.game),
        updated_cells: result.updated.iter().map(CellView::from).collect(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_game))
            .route(web::get().to(list_games)),
    );
    cfg.service(web::resource("/{game_id}").route(web::get().to(get_game)));
    cfg.service(web::resource("/{game_id}/moves").route(web::post().to(make_move)));
}
