//! Configuration file loading with precedence handling.

use crate::nav_cache::RestoreTrigger;
use crate::state::Settings;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Env var naming an explicit config file.
pub const ENV_CONFIG: &str = "FEEDVIEW_CONFIG";
/// Env var overriding the session user.
pub const ENV_USERNAME: &str = "FEEDVIEW_USERNAME";
/// Env var overriding the fixture directory.
pub const ENV_DATA_DIR: &str = "FEEDVIEW_DATA_DIR";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// What a scheduled scroll restoration waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RestoreMode {
    /// A fixed delay after mount or tab switch.
    #[default]
    Delay,
    /// The first completed render of the page's list.
    ContentReady,
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/feedview/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory holding the JSON fixtures.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Session user; anonymous when absent.
    #[serde(default)]
    pub username: Option<String>,

    /// Items per request on paginated feeds.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Delay before restoring a remounted page's offset.
    #[serde(default)]
    pub mount_restore_delay_ms: Option<u64>,

    /// Delay before restoring a re-selected tab's offset.
    #[serde(default)]
    pub tab_restore_delay_ms: Option<u64>,

    /// `"delay"` or `"content-ready"`.
    #[serde(default)]
    pub restore_trigger: Option<RestoreMode>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Fixture directory.
    pub data_dir: PathBuf,
    /// Session user, unvalidated.
    pub username: Option<String>,
    /// Items per request on paginated feeds.
    pub page_size: usize,
    /// Mount restore delay in milliseconds.
    pub mount_restore_delay_ms: u64,
    /// Tab restore delay in milliseconds.
    pub tab_restore_delay_ms: u64,
    /// Restore trigger kind.
    pub restore_trigger: RestoreMode,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            username: None,
            page_size: 10,
            mount_restore_delay_ms: 150,
            tab_restore_delay_ms: 50,
            restore_trigger: RestoreMode::Delay,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Runtime tunables for the state machine.
    ///
    /// A zero page size is raised to one.
    pub fn settings(&self) -> Settings {
        let trigger = |ms: u64| match self.restore_trigger {
            RestoreMode::Delay => RestoreTrigger::Delay(Duration::from_millis(ms)),
            RestoreMode::ContentReady => RestoreTrigger::ContentReady,
        };
        Settings {
            page_size: self.page_size.max(1),
            mount_restore: trigger(self.mount_restore_delay_ms),
            tab_restore: trigger(self.tab_restore_delay_ms),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/feedview/feedview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("feedview").join("feedview.log")
    } else {
        PathBuf::from("feedview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/feedview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("feedview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `FEEDVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/feedview/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{ENV_CONFIG} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `FEEDVIEW_USERNAME` and `FEEDVIEW_DATA_DIR`.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(username) = std::env::var(ENV_USERNAME) {
        config.username = Some(username);
    }
    if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
        config.data_dir = PathBuf::from(dir);
    }
    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        data_dir: config.data_dir.unwrap_or(defaults.data_dir),
        username: config.username.or(defaults.username),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        mount_restore_delay_ms: config
            .mount_restore_delay_ms
            .unwrap_or(defaults.mount_restore_delay_ms),
        tab_restore_delay_ms: config
            .tab_restore_delay_ms
            .unwrap_or(defaults.tab_restore_delay_ms),
        restore_trigger: config.restore_trigger.unwrap_or(defaults.restore_trigger),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    data_dir_override: Option<PathBuf>,
    username_override: Option<String>,
) -> ResolvedConfig {
    if let Some(dir) = data_dir_override {
        config.data_dir = dir;
    }
    if let Some(username) = username_override {
        config.username = Some(username);
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
