//! Assertions for the backend's JSON error contract.
//!
//! Every error response carries `{error, code, timestamp}` and an
//! `x-trace-id` header. These helpers check that shape without depending
//! on backend types.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub error: String,
    pub code: String,
    pub timestamp: String,
}

/// Check status, code and (optionally) the exact `error` message of an
/// error response already split into parts. Returns the parsed body.
pub fn assert_error_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
    expected_error: Option<&str>,
) -> ErrorBodyLike {
    assert_eq!(
        status,
        expected_status,
        "unexpected status; body: {}",
        String::from_utf8_lossy(body)
    );

    let parsed: ErrorBodyLike =
        serde_json::from_slice(body).expect("error body should be {error, code, timestamp}");

    let trace_id = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert!(!trace_id.is_empty(), "x-trace-id should not be empty");

    assert_eq!(parsed.code, expected_code);
    if let Some(expected) = expected_error {
        assert_eq!(parsed.error, expected);
    }
    OffsetDateTime::parse(&parsed.timestamp, &Rfc3339)
        .expect("timestamp should be RFC 3339");

    parsed
}

/// Consume a test-service response and assert it is the expected error.
pub async fn assert_error_response<B>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_error: Option<&str>,
) -> ErrorBodyLike
where
    B: MessageBody,
{
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    assert_error_parts(
        status,
        &headers,
        &body,
        expected_status,
        expected_code,
        expected_error,
    )
}
