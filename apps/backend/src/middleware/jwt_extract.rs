//! Token gate middleware for the protected `/api` scope.
//!
//! Runs the shared [`TokenAuthenticator`](crate::auth::TokenAuthenticator)
//! against the `Authorization` header. On success the decoded [`ClaimSet`]
//! is stored in request extensions for handlers; on rejection the handler
//! is never invoked and the request ends with a 401 error body.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::{AuthErrorKind, AuthOutcome, ClaimSet};
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return Box::pin(async {
                Err(AppError::config("AppState not available").into())
            });
        };

        // Non-UTF-8 bytes cannot form a valid token; the lossy string still
        // reaches the gate so it is rejected there like any other bad token.
        let header_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

        match app_state.authenticator.authenticate(header_value.as_deref()) {
            AuthOutcome::Authenticated(claims) => {
                req.extensions_mut().insert::<ClaimSet>(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            AuthOutcome::Rejected(kind, _) => Box::pin(reject(req, kind)),
        }
    }
}

// Builds the 401 inside the request future so the error body carries the
// request's trace id.
async fn reject<B>(
    req: ServiceRequest,
    kind: AuthErrorKind,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    security::token_rejected(kind, req.path());
    let (req, _payload) = req.into_parts();
    let res = HttpResponse::from_error(AppError::from_auth(kind)).map_into_right_body();
    Ok(ServiceResponse::new(req, res))
}
