use std::sync::Arc;

use crate::config::db::DbSettings;
use crate::config::game_limits::GameLimits;
use crate::domain::generator::{MineSource, OsRandomMines};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_settings: Option<DbSettings>,
    mine_source: Arc<dyn MineSource>,
    limits: GameLimits,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_settings: None,
            mine_source: Arc::new(OsRandomMines),
            limits: GameLimits::default(),
        }
    }

    pub fn with_db(mut self, settings: DbSettings) -> Self {
        self.db_settings = Some(settings);
        self
    }

    pub fn with_mine_source(mut self, source: Arc<dyn MineSource>) -> Self {
        self.mine_source = source;
        self
    }

    pub fn with_limits(mut self, limits: GameLimits) -> Self {
        self.limits = limits;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let limits = self.limits.validate()?;
        match self.db_settings {
            Some(settings) => {
                // single entrypoint: build + migrate
                let conn = bootstrap_db(&settings).await?;
                Ok(AppState::new(conn, self.mine_source, limits))
            }
            None => Ok(AppState::without_db(self.mine_source, limits)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
