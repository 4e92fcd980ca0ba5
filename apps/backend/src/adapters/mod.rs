//! Adapters for external dependencies.

pub mod game_cells_sea;
pub mod games_sea;
