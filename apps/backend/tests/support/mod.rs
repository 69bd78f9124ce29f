#![allow(dead_code)]

pub mod app_builder;

// Re-export only what current tests actually import
pub use app_builder::{create_test_app, test_state};
