//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "XASK_CONFIG";

/// Environment variable overriding the narration engine.
pub const ENGINE_ENV_VAR: &str = "XASK_ENGINE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A color setting is not a color ratatui understands.
    #[error("Invalid color for {key}: {value:?}")]
    InvalidColor {
        /// Config key holding the color.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/xask/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Narration engine (`espeak`, `festival`, `dummy`).
    #[serde(default)]
    pub engine: Option<String>,

    /// Characters per line the font is fitted to.
    #[serde(default)]
    pub page_columns: Option<u16>,

    /// Lines per page the font is fitted to.
    #[serde(default)]
    pub page_rows: Option<u16>,

    /// Font family name.
    #[serde(default)]
    pub font_family: Option<String>,

    /// Frame rate of the reveal animation.
    #[serde(default)]
    pub fps: Option<u32>,

    /// Screen background.
    #[serde(default)]
    pub background_color: Option<String>,

    /// Glyph color.
    #[serde(default)]
    pub text_color: Option<String>,

    /// Cursor fill color.
    #[serde(default)]
    pub cursor_color: Option<String>,

    /// Fallback cell width in pixels when the terminal does not report one.
    #[serde(default)]
    pub cell_width_px: Option<u32>,

    /// Fallback cell height in pixels when the terminal does not report one.
    #[serde(default)]
    pub cell_height_px: Option<u32>,

    /// Keep the finished message on screen until a key is pressed.
    #[serde(default)]
    pub wait_for_keypress: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args. Colors stay
/// unparsed here; [`crate::config::RenderConfig::from_resolved`] validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Narration engine name.
    pub engine: String,
    /// Page columns.
    pub page_columns: u16,
    /// Page rows.
    pub page_rows: u16,
    /// Font family.
    pub font_family: String,
    /// Frames per second.
    pub fps: u32,
    /// Background color spec.
    pub background_color: String,
    /// Text color spec.
    pub text_color: String,
    /// Cursor color spec.
    pub cursor_color: String,
    /// Fallback cell width.
    pub cell_width_px: u32,
    /// Fallback cell height.
    pub cell_height_px: u32,
    /// Wait for a key after the message settles.
    pub wait_for_keypress: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            engine: "espeak".to_string(),
            page_columns: 20,
            page_rows: 6,
            font_family: "FreeMono, Monospace".to_string(),
            fps: 30,
            background_color: "black".to_string(),
            text_color: "white".to_string(),
            cursor_color: "#008000".to_string(),
            cell_width_px: 8,
            cell_height_px: 16,
            wait_for_keypress: true,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/xask/xask.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("xask").join("xask.log")
    } else {
        PathBuf::from("xask.log")
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
/// Returns `~/.config/xask/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("xask").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `XASK_CONFIG` environment variable
/// 3. Default path `~/.config/xask/config.toml`
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

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `XASK_ENGINE` for the narration engine.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(engine) = std::env::var(ENGINE_ENV_VAR) {
        config.engine = engine;
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
        engine: config.engine.unwrap_or(defaults.engine),
        page_columns: config.page_columns.unwrap_or(defaults.page_columns),
        page_rows: config.page_rows.unwrap_or(defaults.page_rows),
        font_family: config.font_family.unwrap_or(defaults.font_family),
        fps: config.fps.unwrap_or(defaults.fps),
        background_color: config.background_color.unwrap_or(defaults.background_color),
        text_color: config.text_color.unwrap_or(defaults.text_color),
        cursor_color: config.cursor_color.unwrap_or(defaults.cursor_color),
        cell_width_px: config.cell_width_px.unwrap_or(defaults.cell_width_px),
        cell_height_px: config.cell_height_px.unwrap_or(defaults.cell_height_px),
        wait_for_keypress: config
            .wait_for_keypress
            .unwrap_or(defaults.wait_for_keypress),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    engine_override: Option<String>,
) -> ResolvedConfig {
    if let Some(engine) = engine_override {
        config.engine = engine;
    }

    config
}

/// Run the whole precedence chain: file, env, then CLI.
///
/// # Errors
///
/// Propagates [`ConfigError`] from reading or parsing the config file.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    engine_override: Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let merged = merge_config(file);
    let with_env = apply_env_overrides(merged);
    Ok(apply_cli_overrides(with_env, engine_override))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
