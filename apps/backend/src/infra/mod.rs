//! Infrastructure layer - database, state management, locking and error mapping.

pub mod db;
pub mod db_errors;
pub mod game_locks;
pub mod state;
