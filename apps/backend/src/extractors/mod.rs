pub mod game_id;
pub mod pagination;
pub mod validated_json;

pub use game_id::GameId;
pub use pagination::Pagination;
pub use validated_json::ValidatedJson;
