//! Process configuration, read from the environment once at startup.

pub mod db;
pub mod push;
pub mod security;
pub mod server;

use std::env;

use crate::error::AppError;

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
