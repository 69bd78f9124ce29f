use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::TraceId;
use crate::auth::ClaimSet;

/// One `request_completed` event per request.
///
/// Level follows the status class: 5xx at error, 4xx at warn, the rest at
/// info. Requests that passed the token gate also carry the caller's id.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

struct Completed {
    method: String,
    path: String,
    trace_id: String,
    status: StatusCode,
    user_id: Option<i32>,
    duration_us: u64,
}

impl Completed {
    fn emit(&self) {
        let status = self.status.as_u16();
        let user_id = self.user_id;
        if self.status.is_server_error() {
            error!(http.method = %self.method, url.path = %self.path, http.status_code = status, user_id, duration_us = self.duration_us, trace_id = %self.trace_id, message = "request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method = %self.method, url.path = %self.path, http.status_code = status, user_id, duration_us = self.duration_us, trace_id = %self.trace_id, message = "request_completed");
        } else {
            info!(http.method = %self.method, url.path = %self.path, http.status_code = status, user_id, duration_us = self.duration_us, trace_id = %self.trace_id, message = "request_completed");
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(|t| t.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, user_id) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request()
                        .extensions()
                        .get::<ClaimSet>()
                        .and_then(ClaimSet::subject_id),
                ),
                Err(err) => (err.as_response_error().status_code(), None),
            };

            Completed {
                method,
                path,
                trace_id,
                status,
                user_id,
                duration_us: start.elapsed().as_micros() as u64,
            }
            .emit();

            result
        })
    }
}
