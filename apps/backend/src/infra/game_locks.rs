//! Keyed mutual exclusion for moves: one in-flight move per game id,
//! unrelated games never wait on each other.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::domain::{DomainError, InfraErrorKind};

type LockMap = DashMap<Uuid, Arc<Mutex<()>>>;

#[derive(Clone, Default)]
pub struct GameLocks {
    locks: Arc<LockMap>,
}

impl std::fmt::Debug for GameLocks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLocks")
            .field("held_or_waiting", &self.locks.len())
            .finish()
    }
}

impl GameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait up to `timeout` for exclusive access to `game_id`.
    pub async fn acquire(
        &self,
        game_id: Uuid,
        timeout: Duration,
    ) -> Result<GameLockGuard, DomainError> {
        let mutex = self
            .locks
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        match tokio::time::timeout(timeout, mutex.lock_owned()).await {
            Ok(guard) => {
                debug!(game_id = %game_id, "game lock acquired");
                Ok(GameLockGuard {
                    guard: Some(guard),
                    game_id,
                    locks: Arc::clone(&self.locks),
                })
            }
            Err(_) => {
                prune(&self.locks, game_id);
                warn!(
                    game_id = %game_id,
                    timeout_ms = timeout.as_millis() as u64,
                    "game lock timeout"
                );
                Err(DomainError::infra(
                    InfraErrorKind::LockTimeout,
                    format!(
                        "another move on game {game_id} is still in progress; retry shortly"
                    ),
                ))
            }
        }
    }

    /// Number of games currently held or waited on.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Drop the entry when the map holds the only reference.
fn prune(locks: &LockMap, game_id: Uuid) {
    locks.remove_if(&game_id, |_, m| Arc::strong_count(m) == 1);
}

/// Exclusive hold on one game; released on drop.
pub struct GameLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    game_id: Uuid,
    locks: Arc<LockMap>,
}

impl std::fmt::Debug for GameLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLockGuard")
            .field("game_id", &self.game_id)
            .finish()
    }
}

impl GameLockGuard {
    pub fn game_id(&self) -> Uuid {
        self.game_id
    }
}

impl Drop for GameLockGuard {
    fn drop(&mut self) {
        // release the mutex (and its Arc) before checking for other holders
        drop(self.guard.take());
        prune(&self.locks, self.game_id);
    }
}
