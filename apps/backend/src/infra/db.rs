use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// An in-memory SQLite database lives in a single connection, so the pool
/// must never open a second one or replace the first.
fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite::memory:") || url.contains("mode=memory")
}

/// Backend name for logs; never includes credentials.
fn engine(url: &str) -> &'static str {
    if url.starts_with("sqlite:") {
        "sqlite"
    } else if url.starts_with("postgres") {
        "postgresql"
    } else {
        "unknown"
    }
}

/// Open a pool for `url` and bring the schema up to date.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(url.to_owned());
    options.sqlx_logging(false);
    if is_sqlite_memory(url) {
        options.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(options).await?;
    migrate(&conn, MigrationCommand::Up).await?;

    info!(engine = engine(url), "Database connected and migrated");
    Ok(conn)
}

/// The database connection, or 503 when the state was built without one.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(|| AppError::DbUnavailable {
        detail: "Database unavailable".to_string(),
    })
}
