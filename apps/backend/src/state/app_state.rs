use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::gate::TokenAuthenticator;
use crate::push::PushSender;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Token gate built from `security`
    pub authenticator: TokenAuthenticator,
    /// Push delivery; `None` when VAPID keys are not configured
    pub push: Option<Arc<dyn PushSender>>,
}

impl AppState {
    /// Create a new AppState with the given database connection and security config
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        let authenticator = TokenAuthenticator::new(&security);
        Self {
            db: Some(db),
            security,
            authenticator,
            push: None,
        }
    }

    /// Create a new AppState without a database connection
    pub fn new_without_db(security: SecurityConfig) -> Self {
        let authenticator = TokenAuthenticator::new(&security);
        Self {
            db: None,
            security,
            authenticator,
            push: None,
        }
    }

    pub fn with_push(mut self, push: Arc<dyn PushSender>) -> Self {
        self.push = Some(push);
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
