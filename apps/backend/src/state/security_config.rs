use std::fmt;

use jsonwebtoken::Algorithm;
use time::Duration;

/// Immutable security settings, loaded once at startup.
#[derive(Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Lifetime of tokens issued at login
    pub token_ttl: Duration,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl SecurityConfig {
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::hours(2);
    pub const DEFAULT_BCRYPT_COST: u32 = 10;

    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: Self::DEFAULT_TOKEN_TTL,
            bcrypt_cost: Self::DEFAULT_BCRYPT_COST,
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
