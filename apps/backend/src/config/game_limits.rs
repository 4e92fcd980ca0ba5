//! Board-size, density, pagination and move-lock limits.

use std::time::Duration;

use super::env_or;
use crate::domain::generator::DEFAULT_MINE_RATIO;
use crate::domain::grid::{GridSpec, MIN_DIMENSION};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq)]
pub struct GameLimits {
    pub min_dimension: u16,
    pub max_dimension: u16,
    pub default_mine_ratio: f64,
    pub default_page_limit: u64,
    pub max_page_limit: u64,
    /// How long a move waits for another move on the same game.
    pub move_lock_timeout: Duration,
}

impl Default for GameLimits {
    fn default() -> Self {
        Self {
            min_dimension: MIN_DIMENSION,
            max_dimension: 100,
            default_mine_ratio: DEFAULT_MINE_RATIO,
            default_page_limit: 50,
            max_page_limit: 100,
            move_lock_timeout: Duration::from_millis(5_000),
        }
    }
}

impl GameLimits {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let limits = Self {
            min_dimension: env_or("GAME_MIN_DIMENSION", defaults.min_dimension)?,
            max_dimension: env_or("GAME_MAX_DIMENSION", defaults.max_dimension)?,
            default_mine_ratio: env_or("GAME_DEFAULT_MINE_RATIO", defaults.default_mine_ratio)?,
            default_page_limit: env_or("PAGINATION_DEFAULT_LIMIT", defaults.default_page_limit)?,
            max_page_limit: env_or("PAGINATION_MAX_LIMIT", defaults.max_page_limit)?,
            move_lock_timeout: Duration::from_millis(env_or(
                "MOVE_LOCK_TIMEOUT_MS",
                defaults.move_lock_timeout.as_millis() as u64,
            )?),
        };
        limits.validate()
    }

    /// Reject combinations the engine can't honor.
    pub fn validate(self) -> Result<Self, AppError> {
        if self.min_dimension < MIN_DIMENSION {
            return Err(AppError::config(format!(
                "GAME_MIN_DIMENSION must be at least {MIN_DIMENSION}"
            )));
        }
        if self.max_dimension < self.min_dimension {
            return Err(AppError::config(
                "GAME_MAX_DIMENSION must not be below GAME_MIN_DIMENSION",
            ));
        }
        if !(0.0..1.0).contains(&self.default_mine_ratio) {
            return Err(AppError::config(
                "GAME_DEFAULT_MINE_RATIO must be in [0, 1)",
            ));
        }
        if self.max_page_limit == 0 || self.default_page_limit == 0 {
            return Err(AppError::config("pagination limits must be positive"));
        }
        if self.default_page_limit > self.max_page_limit {
            return Err(AppError::config(
                "PAGINATION_DEFAULT_LIMIT must not exceed PAGINATION_MAX_LIMIT",
            ));
        }
        Ok(self)
    }

    /// Validate requested board dimensions against the configured bounds.
    pub fn grid_spec(&self, rows: i64, columns: i64) -> Result<GridSpec, DomainError> {
        let range = i64::from(self.min_dimension)..=i64::from(self.max_dimension);
        if !range.contains(&rows) || !range.contains(&columns) {
            return Err(DomainError::validation(
                ValidationKind::InvalidDimensions,
                format!(
                    "rows and columns must be between {} and {} (got {rows}x{columns})",
                    self.min_dimension, self.max_dimension
                ),
            ));
        }
        // range check above keeps both within u16
        GridSpec::new(rows as u16, columns as u16)
    }
}
