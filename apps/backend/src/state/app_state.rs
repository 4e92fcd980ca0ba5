use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::game_limits::GameLimits;
use crate::domain::generator::{MineSource, OsRandomMines};
use crate::infra::game_locks::GameLocks;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Per-game move serialization
    pub game_locks: GameLocks,
    /// Where new boards get their mines
    pub mine_source: Arc<dyn MineSource>,
    pub limits: GameLimits,
}

impl AppState {
    pub fn new(db: DatabaseConnection, mine_source: Arc<dyn MineSource>, limits: GameLimits) -> Self {
        Self {
            db: Some(db),
            game_locks: GameLocks::new(),
            mine_source,
            limits,
        }
    }

    /// State without a database; DB-backed routes answer 503.
    pub fn without_db(mine_source: Arc<dyn MineSource>, limits: GameLimits) -> Self {
        Self {
            db: None,
            game_locks: GameLocks::new(),
            mine_source,
            limits,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::without_db(Arc::new(OsRandomMines), GameLimits::default())
    }
}
