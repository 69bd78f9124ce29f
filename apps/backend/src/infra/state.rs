use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::push::PushSender;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

enum DbSource {
    None,
    Url(String),
    Connection(DatabaseConnection),
}

/// Builder for [`AppState`], shared by `main` and the tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db: DbSource,
    push: Option<Arc<dyn PushSender>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db: DbSource::None,
            push: None,
        }
    }

    /// Connect to (and migrate) the database at `url` during `build`.
    pub fn with_db_url(mut self, url: impl Into<String>) -> Self {
        self.db = DbSource::Url(url.into());
        self
    }

    /// Use an already migrated connection.
    pub fn with_connection(mut self, conn: DatabaseConnection) -> Self {
        self.db = DbSource::Connection(conn);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_push(mut self, push: Arc<dyn PushSender>) -> Self {
        self.push = Some(push);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let state = match self.db {
            DbSource::None => AppState::new_without_db(self.security_config),
            DbSource::Url(url) => AppState::new(connect_db(&url).await?, self.security_config),
            DbSource::Connection(conn) => AppState::new(conn, self.security_config),
        };

        Ok(match self.push {
            Some(push) => state.with_push(push),
            None => state,
        })
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
