//! Status and action enums shared by the engine, persistence and wire layers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-cell status. `Revealed` and `Detonated` are sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellStatus {
    Hidden,
    Revealed,
    Flagged,
    Detonated,
}

impl CellStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "HIDDEN",
            Self::Revealed => "REVEALED",
            Self::Flagged => "FLAGGED",
            Self::Detonated => "DETONATED",
        }
    }
}

impl fmt::Display for CellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-game status. Anything other than `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Active,
    Cleared,
    Detonated,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cleared | Self::Detonated)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cleared => "CLEARED",
            Self::Detonated => "DETONATED",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player move kind. Requests that omit the action mean `Reveal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveAction {
    #[default]
    Reveal,
    Flag,
    Unflag,
}

impl MoveAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reveal => "REVEAL",
            Self::Flag => "FLAG",
            Self::Unflag => "UNFLAG",
        }
    }
}

impl fmt::Display for MoveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
