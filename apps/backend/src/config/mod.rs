//! Process configuration read from environment variables at startup.

pub mod db;
pub mod game_limits;

use std::env::{self, VarError};
use std::str::FromStr;

use crate::error::AppError;

/// Parse `name` from the environment, falling back to `default` when unset.
/// A set-but-unparsable value is a configuration error.
pub(crate) fn env_or<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|e| {
            AppError::config(format!("environment variable {name}={raw:?} is invalid: {e}"))
        }),
        Err(VarError::NotPresent) => Ok(default),
        Err(e) => Err(AppError::config(format!(
            "environment variable {name} is unreadable: {e}"
        ))),
    }
}

pub(crate) fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
