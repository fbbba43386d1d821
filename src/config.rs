//! Site configuration module.
//!
//! Handles loading, validating, and layering `config.toml`. The file lives at
//! the content root; values it sets override the stock defaults, everything
//! else keeps its default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! assets_dir = "assets"     # Copied verbatim to the output root
//!
//! [site]
//! title = "Wiki"            # Suffix of every <title>, home page heading source
//! description = "Welcome to our documentation"
//! home_heading = "Welcome to our Wiki"
//! home_tagline = "Explore our documentation, coding standards and more!"
//!
//! [sidebar]
//! featured_sections = 4     # Section cards shown on the home page
//!
//! [colors.light]
//! background = "#fdf2f8"
//! text = "#1f2937"
//! text_muted = "#6b7280"    # Breadcrumbs, descriptions, inert sidebar labels
//! border = "#fce7f3"
//! accent = "#db2777"        # Links, headings, active sidebar entry
//! accent_soft = "#fce7f3"   # Active sidebar background, hover states
//!
//! [colors.dark]
//! background = "#111827"
//! text = "#f3f4f6"
//! text_muted = "#9ca3af"
//! border = "#374151"
//! accent = "#f472b6"
//! accent_soft = "#3b1d2e"
//!
//! [processing]
//! max_processes = 4         # Max parallel page renderers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want.
//!
//! ```toml
//! [site]
//! title = "Handbook"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the content root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory under the content root copied verbatim to the output root.
    pub assets_dir: String,
    /// Site identity shown in titles and on the home page.
    pub site: SiteInfo,
    /// Sidebar and home page layout.
    pub sidebar: SidebarConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            site: SiteInfo::default(),
            sidebar: SidebarConfig::default(),
            colors: ColorConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if self.assets_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assets_dir must not be empty".into(),
            ));
        }
        for (mode, scheme) in [("light", &self.colors.light), ("dark", &self.colors.dark)] {
            if let Some(key) = scheme.first_empty() {
                return Err(ConfigError::Validation(format!(
                    "colors.{mode}.{key} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Appended to every page title: `Setup | Wiki`.
    pub title: String,
    /// `<meta name="description">` of the home page.
    pub description: String,
    /// Heading of the home page when the content has no root `index.md`.
    pub home_heading: String,
    /// Line under the home page heading.
    pub home_tagline: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Wiki".to_string(),
            description: "Welcome to our documentation".to_string(),
            home_heading: "Welcome to our Wiki".to_string(),
            home_tagline: "Explore our documentation, coding standards and more!".to_string(),
        }
    }
}

/// Sidebar and home page layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    /// Number of top-level sections shown as cards on the home page.
    pub featured_sections: usize,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            featured_sections: 4,
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page renderers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text (breadcrumbs, descriptions, inert sidebar labels).
    pub text_muted: String,
    /// Card and sidebar borders.
    pub border: String,
    /// Links, headings and the active sidebar entry.
    pub accent: String,
    /// Active sidebar background and hover states.
    pub accent_soft: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#fdf2f8".to_string(),
            text: "#1f2937".to_string(),
            text_muted: "#6b7280".to_string(),
            border: "#fce7f3".to_string(),
            accent: "#db2777".to_string(),
            accent_soft: "#fce7f3".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111827".to_string(),
            text: "#f3f4f6".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#374151".to_string(),
            accent: "#f472b6".to_string(),
            accent_soft: "#3b1d2e".to_string(),
        }
    }

    fn first_empty(&self) -> Option<&'static str> {
        [
            ("background", &self.background),
            ("text", &self.text),
            ("text_muted", &self.text_muted),
            ("border", &self.border),
            ("accent", &self.accent),
            ("accent_soft", &self.accent_soft),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// The base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file and `Err` if the
/// file exists but is not valid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Docs Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the root of the content directory:
#   content/config.toml
#
# Only the keys you want to change are needed.
# Unknown keys will cause an error.

# Directory (inside the content root) copied verbatim to the output root.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Appended to every page title: "Setup | Wiki".
title = "Wiki"

# Description meta tag of the home page.
description = "Welcome to our documentation"

# Home page heading and tagline (used when there is no content/index.md).
home_heading = "Welcome to our Wiki"
home_tagline = "Explore our documentation, coding standards and more!"

# ---------------------------------------------------------------------------
# Sidebar / home page
# ---------------------------------------------------------------------------
[sidebar]
# Number of top-level sections shown as cards on the home page.
featured_sections = 4

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#fdf2f8"
text = "#1f2937"
text_muted = "#6b7280"    # Breadcrumbs, descriptions, inert sidebar labels
border = "#fce7f3"
accent = "#db2777"        # Links, headings, active sidebar entry
accent_soft = "#fce7f3"   # Active sidebar background, hover states

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111827"
text = "#f3f4f6"
text_muted = "#9ca3af"
border = "#374151"
accent = "#f472b6"
accent_soft = "#3b1d2e"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page renderers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = color_vars(&colors.light, "    "),
        dark = color_vars(&colors.dark, "        "),
    )
}

fn color_vars(scheme: &ColorScheme, pad: &str) -> String {
    [
        ("bg", &scheme.background),
        ("text", &scheme.text),
        ("text-muted", &scheme.text_muted),
        ("border", &scheme.border),
        ("accent", &scheme.accent),
        ("accent-soft", &scheme.accent_soft),
    ]
    .iter()
    .map(|(name, value)| format!("{pad}--color-{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}
