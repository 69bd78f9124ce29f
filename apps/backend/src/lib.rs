#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod push;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::jwt::{mint_access_token, mint_token};
pub use auth::{AuthErrorKind, AuthOutcome, ClaimSet, TokenAuthenticator};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{AuthClaims, ValidatedJson};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::{JwtExtract, RequestTrace, StructuredLogger, TraceSpan};
pub use push::{PushError, PushMessage, PushSender, PushTarget, WebPushSender};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
