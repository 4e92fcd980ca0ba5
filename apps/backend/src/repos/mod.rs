//! Repository layer: domain models over the sea-orm adapters.

pub mod game_cells;
pub mod games;
