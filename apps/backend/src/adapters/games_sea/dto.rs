//! DTOs for games_sea adapter.

use sea_orm::prelude::Uuid;

use crate::entities::games::GameState;

/// DTO for creating a new game row.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub id: Uuid,
    pub rows: i16,
    pub columns: i16,
    pub mine_count: i32,
}

impl GameCreate {
    pub fn new(rows: i16, columns: i16, mine_count: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            rows,
            columns,
            mine_count,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// Version-checked status write. Also bumps `version` and `updated_at`
/// when the status is unchanged, so every applied move is recorded.
#[derive(Debug, Clone)]
pub struct GameUpdateStatus {
    pub id: Uuid,
    pub status: GameState,
    pub expected_version: i32,
}

impl GameUpdateStatus {
    pub fn new(id: Uuid, status: GameState, expected_version: i32) -> Self {
        Self {
            id,
            status,
            expected_version,
        }
    }
}
