use std::env;

use time::Duration;

use super::must_var;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

// Range bcrypt accepts for its work factor.
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Build the process-wide [`SecurityConfig`].
///
/// `JWT_SECRET` is required. `JWT_TTL_SECONDS` and `BCRYPT_COST` override
/// the 2 hour token lifetime and bcrypt cost 10.
pub fn security_from_env() -> Result<SecurityConfig, AppError> {
    let secret = must_var("JWT_SECRET")?;
    if secret.is_empty() {
        return Err(AppError::config("JWT_SECRET must not be empty"));
    }

    let mut config = SecurityConfig::new(secret.into_bytes());

    if let Ok(raw) = env::var("JWT_TTL_SECONDS") {
        let seconds = raw
            .parse::<i64>()
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| {
                AppError::config(format!(
                    "JWT_TTL_SECONDS must be a positive integer, got '{raw}'"
                ))
            })?;
        config = config.with_token_ttl(Duration::seconds(seconds));
    }

    if let Ok(raw) = env::var("BCRYPT_COST") {
        let cost = raw
            .parse::<u32>()
            .ok()
            .filter(|c| (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(c))
            .ok_or_else(|| {
                AppError::config(format!(
                    "BCRYPT_COST must be between {} and {}, got '{raw}'",
                    MIN_BCRYPT_COST,
                    MAX_BCRYPT_COST
                ))
            })?;
        config = config.with_bcrypt_cost(cost);
    }

    Ok(config)
}
