//! Error types and handling for navstack core

use thiserror::Error;

/// Result type alias for navstack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for navstack core
#[derive(Error, Debug)]
pub enum Error {
    /// Router configuration or addressing errors
    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Router errors.
///
/// Every variant is a configuration error surfaced at call time. Popping the
/// root and stale deferred pushes are not errors; they resolve to no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("No tabs configured")]
    NoTabs,

    #[error("Tab '{0}' is configured more than once")]
    DuplicateTab(String),

    #[error("Tab '{0}' not found")]
    UnknownTab(String),

    #[error("Initial tab '{0}' not found in configuration")]
    InitialTabMissing(String),

    #[error("Route '{0}' is not registered")]
    UnregisteredRoute(String),

    #[error("No renderer registered for route '{0}'")]
    RendererMissing(String),
}

/// Configuration-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}
