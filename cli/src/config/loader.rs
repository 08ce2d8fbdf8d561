//! Simple CLI configuration loader for navstack
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Search directory: ./navstack.json or ./.navstack/config.json
//! 3. Git repository root: <repo_root>/.navstack/config.json
//! 4. User config: $XDG_CONFIG_HOME/navstack/config.json or the platform config dir
//! 5. Environment variables only (no files)

use anyhow::{anyhow, Context, Result};
use navstack_core::NavigationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Raw configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Delay between a tab switch and its follow-up push
    #[serde(default)]
    pub handoff_delay_ms: Option<u64>,
    /// Tab selected at start-up
    #[serde(default)]
    pub initial_tab: Option<String>,
}

/// CLI configuration loader
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Directory searched instead of the current working directory
    search_dir: Option<PathBuf>,
    /// Whether user-level config locations are consulted
    use_user_config: bool,
    /// Flag overrides
    delay_override: Option<u64>,
    tab_override: Option<String>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            search_dir: None,
            use_user_config: true,
            delay_override: None,
            tab_override: None,
        }
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Search `dir` instead of the current working directory
    pub fn with_search_dir(mut self, dir: PathBuf) -> Self {
        self.search_dir = Some(dir);
        self
    }

    /// Skip the git root and user config locations
    pub fn without_user_config(mut self) -> Self {
        self.use_user_config = false;
        self
    }

    /// Set handoff delay override
    pub fn with_delay_override(mut self, delay_ms: u64) -> Self {
        self.delay_override = Some(delay_ms);
        self
    }

    /// Set initial tab override
    pub fn with_tab_override(mut self, tab: String) -> Self {
        self.tab_override = Some(tab);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<NavigationConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides
        if let Some(delay_ms) = self.delay_override {
            config.handoff_delay_ms = Some(delay_ms);
        }
        if let Some(tab) = &self.tab_override {
            config.initial_tab = Some(tab.clone());
        }

        // Step 3: Resolve to final navigation config
        self.resolve_config(config)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RawConfig> {
        let search_dir = match &self.search_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        if let Some(config) = self.try_load_dir(&search_dir).await? {
            return Ok(config);
        }

        if self.use_user_config {
            if let Some(config) = self.try_load_git_root(&search_dir).await? {
                return Ok(config);
            }

            if let Some(config) = self.try_load_user().await? {
                return Ok(config);
            }
        }

        self.try_load_env_only()
    }

    /// Try loading from a search directory
    async fn try_load_dir(&self, dir: &Path) -> Result<Option<RawConfig>> {
        // Try ./navstack.json first
        let navstack_json = dir.join("navstack.json");
        if navstack_json.exists() {
            return Ok(Some(self.load_file(&navstack_json).await?));
        }

        // Try ./.navstack/config.json
        let dir_config = dir.join(".navstack").join("config.json");
        if dir_config.exists() {
            return Ok(Some(self.load_file(&dir_config).await?));
        }

        Ok(None)
    }

    /// Try loading from git repository root
    async fn try_load_git_root(&self, start: &Path) -> Result<Option<RawConfig>> {
        if let Some(git_root) = find_git_root(start) {
            let config_path = git_root.join(".navstack").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Try loading from the user config directory
    async fn try_load_user(&self) -> Result<Option<RawConfig>> {
        if let Some(config_dir) = user_config_dir() {
            let config_path = config_dir.join("navstack").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Build configuration from environment variables only
    fn try_load_env_only(&self) -> Result<RawConfig> {
        let handoff_delay_ms = match std::env::var("NAVSTACK_HANDOFF_DELAY_MS") {
            Ok(value) => Some(value.parse::<u64>().with_context(|| {
                format!("Invalid NAVSTACK_HANDOFF_DELAY_MS value: {}", value)
            })?),
            Err(_) => None,
        };

        Ok(RawConfig {
            handoff_delay_ms,
            initial_tab: std::env::var("NAVSTACK_TAB").ok(),
        })
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        tracing::debug!("Loading config from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolve raw config to NavigationConfig
    fn resolve_config(&self, config: RawConfig) -> Result<NavigationConfig> {
        let mut resolved = NavigationConfig::default();
        if let Some(delay_ms) = config.handoff_delay_ms {
            resolved = resolved.with_handoff_delay_ms(delay_ms);
        }
        if let Some(tab) = config.initial_tab {
            resolved = resolved.with_initial_tab(tab);
        }

        resolved
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(resolved)
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Find git repository root
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Get the user config directory, honouring XDG_CONFIG_HOME
fn user_config_dir() -> Option<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg_config) if !xdg_config.is_empty() => Some(PathBuf::from(xdg_config)),
        _ => dirs::config_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    // Tests that touch process environment variables take this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const DELAY_VAR: &str = "NAVSTACK_HANDOFF_DELAY_MS";
    const TAB_VAR: &str = "NAVSTACK_TAB";

    fn isolated_loader(dir: &Path) -> CliConfigLoader {
        CliConfigLoader::new()
            .with_search_dir(dir.to_path_buf())
            .without_user_config()
    }

    #[tokio::test]
    async fn test_load_from_search_dir() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("navstack.json"),
            r#"{ "handoff_delay_ms": 250, "initial_tab": "second" }"#,
        )
        .unwrap();

        let config = isolated_loader(temp_dir.path()).load().await.unwrap();
        assert_eq!(config.handoff_delay_ms, 250);
        assert_eq!(config.initial_tab.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_dot_dir_config_is_found() {
        let temp_dir = tempdir().unwrap();
        let dot_dir = temp_dir.path().join(".navstack");
        std::fs::create_dir_all(&dot_dir).unwrap();
        std::fs::write(dot_dir.join("config.json"), r#"{ "handoff_delay_ms": 40 }"#).unwrap();

        let config = isolated_loader(temp_dir.path()).load().await.unwrap();
        assert_eq!(config.handoff_delay_ms, 40);
        assert_eq!(config.initial_tab, None);
    }

    #[tokio::test]
    async fn test_flag_overrides_win() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("navstack.json"),
            r#"{ "handoff_delay_ms": 250, "initial_tab": "second" }"#,
        )
        .unwrap();

        let config = isolated_loader(temp_dir.path())
            .with_delay_override(0)
            .with_tab_override("first".to_string())
            .load()
            .await
            .unwrap();
        assert_eq!(config.handoff_delay_ms, 0);
        assert_eq!(config.initial_tab.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_config_override_directory() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("config.json"),
            r#"{ "handoff_delay_ms": 75 }"#,
        )
        .unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(temp_dir.path().to_path_buf())
            .load()
            .await
            .unwrap();
        assert_eq!(config.handoff_delay_ms, 75);
    }

    #[tokio::test]
    async fn test_missing_override_path_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let result = CliConfigLoader::new()
            .with_config_override(temp_dir.path().join("absent.json"))
            .load()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("navstack.json"),
            r#"{ "handoff_delay_ms": 999999 }"#,
        )
        .unwrap();

        let error = isolated_loader(temp_dir.path()).load().await.unwrap_err();
        assert!(error.to_string().contains("validation failed"));
    }

    #[tokio::test]
    async fn test_unknown_fields_are_rejected() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("navstack.json"), r#"{ "delay": 5 }"#).unwrap();

        assert!(isolated_loader(temp_dir.path()).load().await.is_err());
    }

    #[tokio::test]
    async fn test_env_only_fallback_without_files() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp_dir = tempdir().unwrap();

        std::env::set_var(DELAY_VAR, "320");
        std::env::set_var(TAB_VAR, "second");
        let config = isolated_loader(temp_dir.path()).load().await;
        std::env::remove_var(DELAY_VAR);
        std::env::remove_var(TAB_VAR);

        let config = config.unwrap();
        assert_eq!(config.handoff_delay_ms, 320);
        assert_eq!(config.initial_tab.as_deref(), Some("second"));

        let defaults = isolated_loader(temp_dir.path()).load().await.unwrap();
        assert_eq!(defaults, NavigationConfig::default());
    }

    #[tokio::test]
    async fn test_env_only_rejects_non_numeric_delay() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp_dir = tempdir().unwrap();

        std::env::set_var(DELAY_VAR, "soon");
        let result = isolated_loader(temp_dir.path()).load().await;
        std::env::remove_var(DELAY_VAR);

        let error = result.unwrap_err();
        assert!(error
            .to_string()
            .contains("Invalid NAVSTACK_HANDOFF_DELAY_MS value: soon"));
    }

    #[tokio::test]
    async fn test_config_file_beats_environment() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp_dir = tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("navstack.json"),
            r#"{ "handoff_delay_ms": 30 }"#,
        )
        .unwrap();

        std::env::set_var(DELAY_VAR, "500");
        let config = isolated_loader(temp_dir.path()).load().await;
        std::env::remove_var(DELAY_VAR);

        assert_eq!(config.unwrap().handoff_delay_ms, 30);
    }

    #[test]
    fn test_find_git_root_walks_up() {
        let temp_dir = tempdir().unwrap();
        std::fs::create_dir_all(temp_dir.path().join(".git")).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_git_root(&nested), Some(temp_dir.path().to_path_buf()));
    }
}
