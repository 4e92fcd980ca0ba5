use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Game ID parsed from the `{game_id}` path segment.
///
/// Only the shape is checked here; existence is the service's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameId(pub Uuid);

impl GameId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        Uuid::parse_str(raw.trim()).map(GameId).map_err(|_| {
            AppError::bad_request(
                ErrorCode::InvalidGameId,
                format!("Invalid game id: {raw}"),
            )
        })
    }
}

impl FromRequest for GameId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(match req.match_info().get("game_id") {
            Some(raw) => GameId::parse(raw),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidGameId,
                "Missing game_id parameter",
            )),
        })
    }
}
