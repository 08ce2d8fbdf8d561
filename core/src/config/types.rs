//! Minimal configuration types for navstack core
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay between a tab switch and its follow-up push
pub const DEFAULT_HANDOFF_DELAY_MS: u64 = 100;

/// Upper bound for the handoff delay
pub const MAX_HANDOFF_DELAY_MS: u64 = 10_000;

/// Navigation settings shared by the router and its presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Milliseconds to wait after a tab switch before pushing the follow-up route
    #[serde(default = "default_handoff_delay_ms")]
    pub handoff_delay_ms: u64,
    /// Tab selected at start-up (first configured tab when absent)
    #[serde(default)]
    pub initial_tab: Option<String>,
}

fn default_handoff_delay_ms() -> u64 {
    DEFAULT_HANDOFF_DELAY_MS
}

impl NavigationConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self {
            handoff_delay_ms: DEFAULT_HANDOFF_DELAY_MS,
            initial_tab: None,
        }
    }

    /// Set the handoff delay in milliseconds
    pub fn with_handoff_delay_ms(mut self, delay_ms: u64) -> Self {
        self.handoff_delay_ms = delay_ms;
        self
    }

    /// Set the initial tab
    pub fn with_initial_tab(mut self, tab: impl Into<String>) -> Self {
        self.initial_tab = Some(tab.into());
        self
    }

    /// Handoff delay as a `Duration`
    pub fn handoff_delay(&self) -> Duration {
        Duration::from_millis(self.handoff_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.handoff_delay_ms > MAX_HANDOFF_DELAY_MS {
            return Err(ConfigError::InvalidValue {
                field: "handoff_delay_ms".to_string(),
                value: self.handoff_delay_ms.to_string(),
            });
        }

        if let Some(tab) = &self.initial_tab {
            if tab.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "initial_tab".to_string(),
                    value: tab.clone(),
                });
            }
        }

        Ok(())
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: NavigationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, NavigationConfig::default());
        assert_eq!(config.handoff_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_validate_rejects_excessive_delay() {
        let config = NavigationConfig::new().with_handoff_delay_ms(MAX_HANDOFF_DELAY_MS + 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "handoff_delay_ms"
        ));
    }

    #[test]
    fn test_validate_rejects_blank_initial_tab() {
        let config = NavigationConfig::new().with_initial_tab("  ");
        assert!(config.validate().is_err());
        assert!(NavigationConfig::new()
            .with_initial_tab("second")
            .validate()
            .is_ok());
    }
}
