use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::{AuthErrorKind, AuthOutcome, ClaimSet};
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

/// Claims of the authenticated caller.
///
/// Inside the `/api` scope the `JwtExtract` middleware has already verified
/// the token and left the [`ClaimSet`] in request extensions. On routes
/// outside that scope the extractor runs the same gate itself, so a handler
/// can opt into authentication just by taking this argument.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub ClaimSet);

impl AuthClaims {
    pub fn claims(&self) -> &ClaimSet {
        &self.0
    }

    pub fn into_inner(self) -> ClaimSet {
        self.0
    }

    /// The caller's user id. A verified token without a usable `id` claim
    /// cannot act as a user and is treated as invalid.
    pub fn user_id(&self) -> Result<i32, AppError> {
        self.0
            .subject_id()
            .ok_or_else(|| AppError::from_auth(AuthErrorKind::InvalidToken))
    }
}

impl FromRequest for AuthClaims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<AuthClaims, AppError> {
    if let Some(claims) = req.extensions().get::<ClaimSet>() {
        return Ok(AuthClaims(claims.clone()));
    }

    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::config("AppState not available"))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    match app_state.authenticator.authenticate(header_value.as_deref()) {
        AuthOutcome::Authenticated(claims) => Ok(AuthClaims(claims)),
        AuthOutcome::Rejected(kind, _) => {
            security::token_rejected(kind, req.path());
            Err(AppError::from_auth(kind))
        }
    }
}
