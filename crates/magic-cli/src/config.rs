//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the engine only ever sees the
//! [`DisplaySettings`] derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `MAGIC__DISPLAY__COLOR=false`
//! 3. Config file: `--config`, else [`AppConfig::config_path`], else
//!    `./.magic.toml`
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use magic_core::domain::{DisplaySettings, LAYOUT_LINES};

use crate::cli::InputArg;
use crate::error::{CliError, CliResult};

/// Project-local config file name.
pub const LOCAL_CONFIG: &str = ".magic.toml";

/// Environment variable prefix; sections are separated by `__`.
const ENV_PREFIX: &str = "MAGIC";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Menu display settings.
    pub display: DisplayConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Key input settings.
    pub input: InputConfig,
}

/// User-facing display options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
    pub animations: bool,
    pub unicode: bool,
    pub reserved_lines: u16,
    pub min_height: u16,
    pub max_width: u16,
    pub size_check_interval_ms: u64,
    pub fallback_width: u16,
    pub fallback_height: u16,
    pub escape_cancels: bool,
    pub quick_select: bool,
    pub show_directory: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let d = DisplaySettings::default();
        Self {
            color: d.color,
            animations: d.animations,
            unicode: d.unicode,
            reserved_lines: d.reserved_lines,
            min_height: d.min_height,
            max_width: d.max_width,
            size_check_interval_ms: d.size_check_interval_ms,
            fallback_width: d.fallback_width,
            fallback_height: d.fallback_height,
            escape_cancels: d.escape_cancels,
            quick_select: d.quick_select,
            show_directory: d.show_directory,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when no `-v`/`-q` flag is given.
    pub level: Option<String>,
    /// Log to this file instead of stderr.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub mode: InputMode,
}

/// Configured input protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Auto,
    Raw,
    Line,
}

impl From<InputArg> for InputMode {
    fn from(arg: InputArg) -> Self {
        match arg {
            InputArg::Auto => Self::Auto,
            InputArg::Raw => Self::Raw,
            InputArg::Line => Self::Line,
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over defaults.
    ///
    /// An explicit `config_file` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default()).context("Invalid built-in defaults")?;
        let mut builder = Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => builder.add_source(toml_file(path).required(true)),
            None => builder
                .add_source(toml_file(&Self::config_path()).required(false))
                .add_source(toml_file(Path::new(LOCAL_CONFIG)).required(false)),
        };

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.magic.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "magic", "magic")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG))
    }

    /// The explicit engine settings for this run.
    ///
    /// `no_color` comes from the command line; `plain` is set when stdout is
    /// not a terminal, so the engine prints listings instead of positioning
    /// the cursor.
    ///
    /// The interactive layout needs a prompt row and at least one item row,
    /// so `reserved_lines` is raised to 1 and `min_height` to one more than
    /// the fixed chrome.
    pub fn display_settings(&self, no_color: bool, plain: bool) -> DisplaySettings {
        let d = &self.display;
        let reserved_lines = d.reserved_lines.max(1);
        DisplaySettings {
            color: d.color && !no_color && !plain,
            animations: d.animations && !plain,
            unicode: d.unicode,
            plain,
            reserved_lines,
            min_height: d.min_height.max(LAYOUT_LINES + reserved_lines + 1),
            max_width: d.max_width,
            size_check_interval_ms: d.size_check_interval_ms,
            fallback_width: d.fallback_width,
            fallback_height: d.fallback_height,
            escape_cancels: d.escape_cancels,
            quick_select: d.quick_select,
            show_directory: d.show_directory,
        }
    }

    /// Serialise to pretty TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Look up a dotted key such as `display.color`.
    pub fn get(&self, key: &str) -> CliResult<String> {
        let root = toml::Value::try_from(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })?;

        let value = key
            .split('.')
            .try_fold(&root, |node, part| node.get(part))
            .ok_or_else(|| CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            })?;

        Ok(match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}
