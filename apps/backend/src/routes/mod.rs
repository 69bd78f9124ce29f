use actix_web::{error, web};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::middleware::JwtExtract;

pub mod auth;
pub mod health;
pub mod lpj;
pub mod module_access;
pub mod modules;
pub mod push;
pub mod roles;
pub mod subscriptions;
pub mod tor;
pub mod transactions;
pub mod users;

/// Register every route.
///
/// Public routes come first so they win over the protected `/api` scope,
/// which runs the token gate before any of its handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(path_config());

    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(push::configure_public_routes);

    cfg.service(
        web::scope("/api")
            .wrap(JwtExtract)
            .configure(users::configure_routes)
            .configure(roles::configure_routes)
            .configure(modules::configure_routes)
            .configure(module_access::configure_routes)
            .configure(tor::configure_routes)
            .configure(lpj::configure_routes)
            .configure(transactions::configure_routes)
            .configure(subscriptions::configure_routes)
            .configure(push::configure_protected_routes),
    );
}

/// Non-numeric `{id}` segments become a 400 error body instead of actix's
/// plain-text 404.
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let detail = match err {
            error::PathError::Deserialize(_) => "Invalid id in path".to_string(),
            other => other.to_string(),
        };
        AppError::bad_request(ErrorCode::BadRequest, detail).into()
    })
}

/// Required text input: absent and empty strings both count as missing.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Required numeric input: zero counts as missing, as it does for ids.
pub(crate) fn non_zero<T: Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}
