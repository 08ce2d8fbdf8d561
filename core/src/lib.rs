//! # navstack Core
//!
//! Core library for navstack - a stack-based, multi-tab navigation router.
//!
//! This library keeps an ordered history of screens per tab, routes push and
//! pop calls to the selected tab, hands off between tabs with a deferred
//! follow-up push, and exposes the identity information a presentation layer
//! needs to render and animate transitions.

// Core modules
pub mod config;
pub mod error;
pub mod router;

// Re-export commonly used types
pub use config::NavigationConfig;
pub use error::{ConfigError, Error, Result, RouterError};
pub use router::{
    Navigator, NavigatorBuilder, RouteId, RouteStack, RouterHandle, RouterSnapshot, StackChange,
    StackRouter, TabId, TabRouter,
};

/// Current version of the navstack-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing, writing to stderr.
///
/// `debug` forces the `debug` level; otherwise `RUST_LOG` is honoured and the
/// level defaults to `warn`. A subscriber that is already installed is kept.
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_keeps_first_subscriber() {
        init_tracing_with_debug(true);
        init_tracing_with_debug(false);
        tracing::debug!("tracing initialized for {}", VERSION);
    }
}
