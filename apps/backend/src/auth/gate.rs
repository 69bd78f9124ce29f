//! Token authentication gate shared by every protected route.
//!
//! `TokenAuthenticator::authenticate` takes the raw `Authorization` header
//! value and returns an [`AuthOutcome`]. It is synchronous, holds only the
//! immutable decoding key, never logs and never panics. Translating a
//! rejection into HTTP and deciding whether to log it is left to the caller
//! (see `middleware::jwt_extract` and `extractors::auth_claims`).

use std::fmt;

use jsonwebtoken::{decode, DecodingKey, Validation};

use super::claims::ClaimSet;
use crate::state::security_config::SecurityConfig;

const BEARER_PREFIX: &str = "Bearer ";

const MISSING_CREDENTIAL_MSG: &str =
    "Authorization header is required. Please provide a valid token.";
const INVALID_TOKEN_MSG: &str =
    "Invalid or expired token. Please login again to get a new token.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    /// No authorization material at all
    MissingCredential,
    /// Bad signature, malformed token or expired: deliberately not told apart
    InvalidToken,
}

impl AuthErrorKind {
    /// Stable, user-facing message for this rejection.
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingCredential => MISSING_CREDENTIAL_MSG,
            Self::InvalidToken => INVALID_TOKEN_MSG,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Authenticated(ClaimSet),
    Rejected(AuthErrorKind, &'static str),
}

impl AuthOutcome {
    fn rejected(kind: AuthErrorKind) -> Self {
        Self::Rejected(kind, kind.message())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn into_result(self) -> Result<ClaimSet, AuthErrorKind> {
        match self {
            Self::Authenticated(claims) => Ok(claims),
            Self::Rejected(kind, _) => Err(kind),
        }
    }
}

/// Verifies HMAC-signed, expiring bearer tokens against one static secret.
#[derive(Clone)]
pub struct TokenAuthenticator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenAuthenticator {
    pub fn new(security: &SecurityConfig) -> Self {
        // Default Validation requires and checks `exp`; pin the algorithm and drop leeway.
        // A token is valid only while `now < exp`.
        // Audience is a claim like any other here, so it is not checked.
        let mut validation = Validation::new(security.algorithm);
        validation.leeway = 0;
        validation.reject_tokens_expiring_in_less_than = 1;
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(&security.jwt_secret),
            validation,
        }
    }

    /// Verify the raw `Authorization` header value.
    ///
    /// A `"Bearer "` prefix (case-sensitive, single space) is stripped when
    /// present; otherwise the whole value is treated as the token.
    pub fn authenticate(&self, header_value: Option<&str>) -> AuthOutcome {
        let raw = match header_value {
            Some(value) if !value.is_empty() => value,
            _ => return AuthOutcome::rejected(AuthErrorKind::MissingCredential),
        };

        let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw);

        match decode::<ClaimSet>(token, &self.key, &self.validation) {
            Ok(data) => AuthOutcome::Authenticated(data.claims),
            Err(_) => AuthOutcome::rejected(AuthErrorKind::InvalidToken),
        }
    }
}

impl fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}
