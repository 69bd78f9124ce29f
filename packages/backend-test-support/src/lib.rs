//! Backend test support utilities
//!
//! Helpers shared by the backend's integration tests: one-time logging
//! setup, assertions on the JSON error body, and unique test data.

pub mod error_body;
pub mod logging;
pub mod unique_helpers;
