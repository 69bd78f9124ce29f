use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{Map, Value};
use time::{Duration, OffsetDateTime};
use tracing::error;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::security_config::SecurityConfig;

const TOKEN_ISSUE_FAILED: &str = "Failed to issue token";

/// Sign `payload` with the configured HMAC algorithm.
///
/// `iat` and `exp` (seconds since epoch) are added to the payload;
/// `exp = issued_at + ttl`.
pub fn mint_token(
    payload: &Map<String, Value>,
    issued_at: OffsetDateTime,
    ttl: Duration,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = issued_at.unix_timestamp();
    let exp = (issued_at + ttl).unix_timestamp();

    let mut claims = payload.clone();
    claims.insert("iat".to_string(), Value::from(iat));
    claims.insert("exp".to_string(), Value::from(exp));

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| {
        error!(error = %e, "Failed to encode JWT");
        AppError::internal(ErrorCode::Internal, TOKEN_ISSUE_FAILED)
    })
}

/// Mint a login token with the configured TTL, issued now.
pub fn mint_access_token(
    payload: &Map<String, Value>,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    mint_token(payload, OffsetDateTime::now_utc(), security.token_ttl, security)
}
