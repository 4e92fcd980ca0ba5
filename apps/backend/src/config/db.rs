use std::str::FromStr;

use super::{env_or, env_string};
use crate::error::AppError;

/// Which database engine backs the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    /// Private in-memory database; lives as long as the pool.
    SqliteMemory,
}

impl DbKind {
    pub fn is_sqlite(self) -> bool {
        matches!(self, DbKind::SqliteFile | DbKind::SqliteMemory)
    }
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite_file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "unknown DB_KIND '{other}' (expected postgres | sqlite-file | sqlite-memory)"
            ))),
        }
    }
}

/// Everything needed to open the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct DbSettings {
    pub kind: DbKind,
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_ms: u64,
    /// SQLite only
    pub busy_timeout_ms: u64,
}

impl DbSettings {
    /// Read `DB_KIND` and the matching connection variables.
    pub fn from_env() -> Result<Self, AppError> {
        let kind = env_or("DB_KIND", DbKind::Postgres)?;
        Self::for_kind(kind)
    }

    /// Settings for `kind`, with connection details from the environment.
    pub fn for_kind(kind: DbKind) -> Result<Self, AppError> {
        Ok(Self {
            kind,
            url: db_url(kind)?,
            max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout_ms: env_or("DB_ACQUIRE_TIMEOUT_MS", 5_000)?,
            busy_timeout_ms: env_or("SQLITE_BUSY_TIMEOUT_MS", 5_000)?,
        })
    }

    /// Fresh in-memory SQLite; used by tests and local experiments.
    pub fn sqlite_memory() -> Self {
        Self {
            kind: DbKind::SqliteMemory,
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_ms: 5_000,
            busy_timeout_ms: 5_000,
        }
    }
}

/// Builds the connection URL for `kind` from environment variables.
pub fn db_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => {
            let host = env_string("POSTGRES_HOST", "localhost");
            let port: u16 = env_or("POSTGRES_PORT", 5432)?;
            let db_name = env_string("POSTGRES_DB", "minesweeper");
            let username = env_string("POSTGRES_USER", "minesweeper");
            let password = env_string("POSTGRES_PASSWORD", "minesweeper");
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let path = env_string("SQLITE_PATH", "./data/minesweeper.db");
            if path.trim().is_empty() {
                return Err(AppError::config("SQLITE_PATH must not be empty"));
            }
            Ok(format!("sqlite://{path}"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}
