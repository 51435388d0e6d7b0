//! Theme preference for hosts that render the tree.
//!
//! The preference is `system`, `dark`, or `light`. `system` follows the
//! environment: the `COLORFGBG` variable set by many terminals names the
//! background color, and a light background (white or light gray) resolves to
//! the light theme. Anything else resolves to dark.
//!
//! # Examples
//!
//! ```
//! use jsonsmith::theme::{ResolvedTheme, ThemePreference};
//!
//! assert_eq!(ThemePreference::System.resolve_with(Some("0;15")), ResolvedTheme::Light);
//! assert_eq!(ThemePreference::System.resolve_with(None), ResolvedTheme::Dark);
//! assert_eq!(ThemePreference::Light.resolve_with(Some("15;0")), ResolvedTheme::Light);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The theme the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the environment
    #[default]
    System,
    Dark,
    Light,
}

/// The theme actually applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Dark,
    Light,
}

impl ResolvedTheme {
    pub fn opposite(self) -> Self {
        match self {
            ResolvedTheme::Dark => ResolvedTheme::Light,
            ResolvedTheme::Light => ResolvedTheme::Dark,
        }
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedTheme::Dark => f.write_str("dark"),
            ResolvedTheme::Light => f.write_str("light"),
        }
    }
}

impl From<ResolvedTheme> for ThemePreference {
    fn from(theme: ResolvedTheme) -> Self {
        match theme {
            ResolvedTheme::Dark => ThemePreference::Dark,
            ResolvedTheme::Light => ThemePreference::Light,
        }
    }
}

impl ThemePreference {
    /// Resolves against the current process environment.
    pub fn resolve(self) -> ResolvedTheme {
        self.resolve_with(std::env::var("COLORFGBG").ok().as_deref())
    }

    /// Resolves against an explicit `COLORFGBG` value.
    pub fn resolve_with(self, colorfgbg: Option<&str>) -> ResolvedTheme {
        match self {
            ThemePreference::Dark => ResolvedTheme::Dark,
            ThemePreference::Light => ResolvedTheme::Light,
            ThemePreference::System => system_theme(colorfgbg),
        }
    }

    /// Pins the opposite of what is currently shown.
    ///
    /// A `system` preference stops following the environment after a toggle.
    pub fn toggled(self, current: ResolvedTheme) -> Self {
        current.opposite().into()
    }
}

/// Interprets a `COLORFGBG` value such as `"15;0"` (foreground;background).
fn system_theme(colorfgbg: Option<&str>) -> ResolvedTheme {
    let background = colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());

    match background {
        Some(7) | Some(15) => ResolvedTheme::Light,
        _ => ResolvedTheme::Dark,
    }
}
