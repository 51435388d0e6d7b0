//! Configuration system for jsonsmith.
//!
//! This module provides the configuration structure for jsonsmith with sensible
//! defaults and support for serialization/deserialization via serde. The
//! configuration lives in a TOML file and also carries the persisted UI
//! preferences (locale and theme) that hosts read alongside the document.
//!
//! # Example
//!
//! ```
//! use jsonsmith::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.indent_size, 2);
//! assert_eq!(config.undo_limit, 50);
//!
//! // Create custom configuration
//! let custom = Config {
//!     indent_size: 4,
//!     ..Config::default()
//! };
//! ```

use crate::theme::ThemePreference;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Locale {
    /// Picks a locale from a POSIX locale string such as `zh_CN.UTF-8`.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonsmith::config::Locale;
    ///
    /// assert_eq!(Locale::from_system_value(Some("zh_TW.UTF-8")), Locale::ZhCn);
    /// assert_eq!(Locale::from_system_value(Some("C")), Locale::EnUs);
    /// assert_eq!(Locale::from_system_value(None), Locale::EnUs);
    /// ```
    pub fn from_system_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.to_ascii_lowercase().starts_with("zh") => Locale::ZhCn,
            _ => Locale::EnUs,
        }
    }

    /// Detects the locale from `LC_ALL`, `LC_MESSAGES`, then `LANG`.
    pub fn system() -> Self {
        let value = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|v| !v.is_empty());
        Self::from_system_value(value.as_deref())
    }

    pub fn toggled(self) -> Self {
        match self {
            Locale::EnUs => Locale::ZhCn,
            Locale::ZhCn => Locale::EnUs,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::ZhCn => "zh-CN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for jsonsmith.
///
/// # Fields
///
/// * `indent_size` - Spaces per indentation level when serializing (default: 2)
/// * `undo_limit` - Maximum number of history snapshots kept (default: 50)
/// * `max_import_bytes` - Largest file accepted for import (default: 10MB)
/// * `create_backup` - Create .bak files before saving (default: false)
/// * `locale` - Interface language; detected from the environment when unset
/// * `theme` - Theme preference (default: system)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Spaces per indentation level when serializing
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Maximum number of history snapshots kept
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// Largest file, in bytes, accepted for import
    #[serde(default = "default_max_import_bytes")]
    pub max_import_bytes: u64,

    /// Create .bak files before saving
    #[serde(default)]
    pub create_backup: bool,

    /// Interface language, `None` means follow the environment
    #[serde(default)]
    pub locale: Option<Locale>,

    #[serde(default)]
    pub theme: ThemePreference,
}

fn default_indent_size() -> usize {
    2
}

fn default_undo_limit() -> usize {
    crate::editor::undo::DEFAULT_HISTORY_LIMIT
}

/// Returns the default import limit (10MB).
fn default_max_import_bytes() -> u64 {
    10 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_size: default_indent_size(),
            undo_limit: default_undo_limit(),
            max_import_bytes: default_max_import_bytes(),
            create_backup: false,
            locale: None,
            theme: ThemePreference::default(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/jsonsmith/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("jsonsmith");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from a specific file, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "ignoring malformed config file");
                Self::default()
            }),
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read config file");
                Self::default()
            }
        }
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to a specific file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// The configured locale, or the environment's when unset.
    pub fn resolved_locale(&self) -> Locale {
        self.locale.unwrap_or_else(Locale::system)
    }

    /// Switches between the two supported locales and pins the result.
    pub fn toggle_locale(&mut self) -> Locale {
        let next = self.resolved_locale().toggled();
        self.locale = Some(next);
        next
    }

    /// Pins the opposite of the currently resolved theme.
    pub fn toggle_theme(&mut self) -> crate::theme::ResolvedTheme {
        let current = self.theme.resolve();
        self.theme = self.theme.toggled(current);
        self.theme.resolve()
    }
}
