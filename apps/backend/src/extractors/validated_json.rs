use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::future::LocalBoxFuture;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Request bodies above this size are refused before parsing.
const MAX_BODY_BYTES: usize = 256 * 1024;

/// JSON body extractor whose failures come back as the standard error body.
///
/// An empty body is read as `{}`, so handlers whose payload fields are all
/// optional still get to report their own "field is required" messages
/// instead of a parse error.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_ctx::trace_id(), error = %e, "Failed to read request body");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Request body too large",
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            let parsed = parse_body::<T>(&body)?;
            Ok(ValidatedJson(parsed))
        })
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    let source: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };

    serde_json::from_slice::<T>(source).map_err(|e| {
        debug!(
            trace_id = %trace_ctx::trace_id(),
            error = %Redacted(&e.to_string()),
            body_size = body.len(),
            "JSON parsing failed"
        );
        AppError::bad_request(ErrorCode::BadRequest, classify_json_error(&e))
    })
}

/// Caller-facing description of a parse failure; never echoes body content.
fn classify_json_error(error: &JsonError) -> String {
    use serde_json::error::Category;

    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => "Invalid JSON: wrong types for one or more fields".to_string(),
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
