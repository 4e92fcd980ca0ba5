//! Error codes for the minesweeper backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in the `code` member of Problem Details responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Invalid game ID provided
    InvalidGameId,
    /// Board dimensions outside the configured bounds
    InvalidDimensions,
    /// Requested mine count is not a usable number
    InvalidMineCount,
    /// Move coordinates outside the board
    InvalidCoordinates,
    /// Bad limit/offset query parameters
    InvalidPagination,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// General not found error
    NotFound,

    // Game Rules
    /// Move attempted on a cleared or detonated game
    GameNotActive,
    /// Action not allowed from the cell's current status
    InvalidCellTransition,

    // Concurrency
    /// Another move on the same game held the lock for too long
    GameBusy,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,

    // Database Constraint Violations
    /// Unique constraint violation
    UniqueViolation,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidDimensions => "INVALID_DIMENSIONS",
            Self::InvalidMineCount => "INVALID_MINE_COUNT",
            Self::InvalidCoordinates => "INVALID_COORDINATES",
            Self::InvalidPagination => "INVALID_PAGINATION",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Game Rules
            Self::GameNotActive => "GAME_NOT_ACTIVE",
            Self::InvalidCellTransition => "INVALID_CELL_TRANSITION",

            // Concurrency
            Self::GameBusy => "GAME_BUSY",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",

            // Database Constraint Violations
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }

    /// Every code, in declaration order. Used by the uniqueness test.
    pub const ALL: &'static [ErrorCode] = &[
        Self::InvalidGameId,
        Self::InvalidDimensions,
        Self::InvalidMineCount,
        Self::InvalidCoordinates,
        Self::InvalidPagination,
        Self::ValidationError,
        Self::BadRequest,
        Self::GameNotFound,
        Self::NotFound,
        Self::GameNotActive,
        Self::InvalidCellTransition,
        Self::GameBusy,
        Self::OptimisticLock,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::UniqueViolation,
        Self::RecordNotFound,
        Self::Internal,
        Self::ConfigError,
        Self::DataCorruption,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
