//! Logging helpers shared by middleware and services.

pub mod pii;
pub mod security;
