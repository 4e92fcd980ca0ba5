use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::Deserialize;

use crate::config::game_limits::GameLimits;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// `?limit=&offset=` with configured defaults and bounds applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Default, Deserialize)]
struct RawPagination {
    limit: Option<String>,
    offset: Option<String>,
}

/// Largest value the SQL layer can bind (`BIGINT`).
const MAX_BOUND: u64 = i64::MAX as u64;

fn invalid(detail: impl Into<String>) -> AppError {
    AppError::bad_request(ErrorCode::InvalidPagination, detail)
}

impl Pagination {
    pub fn from_query(query: &str, limits: &GameLimits) -> Result<Self, AppError> {
        let raw = web::Query::<RawPagination>::from_query(query)
            .map_err(|_| invalid("Malformed pagination query"))?
            .into_inner();

        let limit = match raw.limit.as_deref().map(str::trim) {
            None | Some("") => limits.default_page_limit,
            Some(s) => s
                .parse::<u64>()
                .ok()
                .filter(|l| (1..=limits.max_page_limit.min(MAX_BOUND)).contains(l))
                .ok_or_else(|| {
                    invalid(format!(
                        "limit must be an integer between 1 and {}",
                        limits.max_page_limit
                    ))
                })?,
        };
        let offset = match raw.offset.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(s) => s
                .parse::<u64>()
                .ok()
                .filter(|o| *o <= MAX_BOUND)
                .ok_or_else(|| {
                    invalid(format!(
                        "offset must be an integer between 0 and {MAX_BOUND}"
                    ))
                })?,
        };

        Ok(Self { limit, offset })
    }
}

impl FromRequest for Pagination {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<AppState>>() {
            Some(state) => Pagination::from_query(req.query_string(), &state.limits),
            None => Pagination::from_query(req.query_string(), &GameLimits::default()),
        };
        ready(result)
    }
}
