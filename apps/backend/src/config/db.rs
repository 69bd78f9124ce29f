use std::env;

use super::must_var;
use crate::error::AppError;

/// Database URL for the backend.
///
/// `DATABASE_URL` wins when set; otherwise a PostgreSQL URL is composed from
/// `POSTGRES_HOST`, `POSTGRES_PORT`, `POSTGRES_DB`, `POSTGRES_USER` and
/// `POSTGRES_PASSWORD`.
pub fn db_url() -> Result<String, AppError> {
    if let Ok(url) = env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }

    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = must_var("POSTGRES_DB")?;
    let username = must_var("POSTGRES_USER")?;
    let password = must_var("POSTGRES_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}
