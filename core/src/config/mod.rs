//! Minimal configuration module for navstack core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::{NavigationConfig, DEFAULT_HANDOFF_DELAY_MS, MAX_HANDOFF_DELAY_MS};
