//! Unique values for test data, so tests sharing a database never collide.

use uuid::Uuid;

/// `{prefix}-{uuid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// `{prefix}-{uuid}@example.test`
pub fn unique_email(prefix: &str) -> String {
    format!("{}@example.test", unique_str(prefix))
}

/// A digits-only NIM (student number) unlikely to repeat within a run.
pub fn unique_nim() -> String {
    let n = Uuid::new_v4().as_u128() % 10_000_000_000;
    format!("{n:010}")
}
