pub mod game_cells;
pub mod games;

pub use game_cells::Entity as GameCells;
pub use game_cells::Model as GameCell;
pub use games::Entity as Games;
pub use games::Model as Game;
