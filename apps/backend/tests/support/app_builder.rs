use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use simjur_backend::infra::state::build_state;
use simjur_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use simjur_backend::push::PushSender;
use simjur_backend::routes;
use simjur_backend::state::app_state::AppState;
use simjur_backend::state::security_config::SecurityConfig;
use simjur_backend::AppError;

use super::auth::test_security;

pub const MEMORY_DB_URL: &str = "sqlite::memory:";

/// Fresh, migrated in-memory database with the test security config.
pub async fn test_state() -> Result<AppState, AppError> {
    build_state()
        .with_db_url(MEMORY_DB_URL)
        .with_security(test_security())
        .build()
        .await
}

/// Like [`test_state`], with a push sender installed.
pub async fn test_state_with_push(sender: Arc<dyn PushSender>) -> Result<AppState, AppError> {
    build_state()
        .with_db_url(MEMORY_DB_URL)
        .with_security(test_security())
        .with_push(sender)
        .build()
        .await
}

/// State with no database, for routes that must work (or fail cleanly)
/// without one.
pub async fn test_state_without_db(security: SecurityConfig) -> Result<AppState, AppError> {
    build_state().with_security(security).build().await
}

/// Builder for creating test Actix service instances wired like `main`.
pub struct TestAppBuilder {
    state: AppState,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Build the test service with the production middleware stack and routes
    pub async fn build(
        self,
    ) -> Result<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>, AppError>
    {
        // Wrap AppState with web::Data at the boundary
        let data = web::Data::new(self.state);

        let service = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(routes::configure),
        )
        .await;

        Ok(service)
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
