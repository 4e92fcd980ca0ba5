//! Domain layer: pure minesweeper engine. No HTTP or database imports.

pub mod board;
pub mod generator;
pub mod grid;
pub mod reveal;
pub mod state_machine;
pub mod types;

#[cfg(test)]
mod tests_props_reveal;

pub use board::{Board, BoardCell};
pub use generator::{
    FixedMines, MineLayout, MineSource, OsRandomMines, SeededMines, DEFAULT_MINE_RATIO,
};
pub use grid::GridSpec;
pub use state_machine::{apply_move, CellDelta, MoveOutcome};
pub use types::{CellStatus, GameStatus, MoveAction};
