//! Project configuration module.
//!
//! Handles loading, validating, and merging `pseo.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top, so a
//! config only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = "https://example.com"   # Prefix for canonical URLs
//! # templates_dir = "templates"      # Extra *.toml template files, one template each
//!
//! [site]
//! name = "File Transfer"             # Publisher/author name in JSON-LD
//! # logo = "https://example.com/logo.png"
//! # description = "..."
//! same_as = []                       # Social/profile URLs
//!
//! [generation]
//! default_max_combinations = 100     # Cap for templates without max_combinations
//! include_structured_data = false
//! generic_keywords = ["file transfer", "send files online", "peer to peer file sharing"]
//!
//! [limits]
//! title_min = 10
//! title_max = 60
//! description_min = 50
//! description_max = 160
//!
//! [[templates]]
//! name = "device-transfer"
//! title = "Send Files from {device1} to {device2}"
//! description = "..."
//! url_pattern = "send-file-from-{device1}-to-{device2}"
//! [templates.variables]
//! device1 = ["iPhone", "Android"]
//! device2 = ["Windows PC", "Mac"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::page::{DEFAULT_BASE_URL, default_generic_keywords};
use crate::schema::SiteInfo;
use crate::template::{DEFAULT_MAX_COMBINATIONS, RegistryError, TemplateConfig, TemplateRegistry};
use crate::validate::{ValidationLimits, is_http_url};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Template file {path}: {source}")]
    TemplateFile {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Template directory error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `pseo.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PseoConfig {
    /// Prefix for every canonical URL.
    pub base_url: String,
    /// Directory of additional template files, relative to the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<String>,
    /// Site identity used by the JSON-LD builders.
    pub site: SiteInfo,
    /// Generation defaults.
    pub generation: GenerationSettings,
    /// Title/description bounds for template and page validation.
    pub limits: ValidationLimits,
    /// Templates declared inline.
    pub templates: Vec<TemplateConfig>,
}

impl Default for PseoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            templates_dir: None,
            site: SiteInfo::default(),
            generation: GenerationSettings::default(),
            limits: ValidationLimits::default(),
            templates: Vec::new(),
        }
    }
}

/// Generation defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationSettings {
    /// Cap for templates that don't set `max_combinations`.
    pub default_max_combinations: usize,
    /// Attach JSON-LD objects to generated pages.
    pub include_structured_data: bool,
    /// Terms appended to every page's keyword list.
    pub generic_keywords: Vec<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            default_max_combinations: DEFAULT_MAX_COMBINATIONS,
            include_structured_data: false,
            generic_keywords: default_generic_keywords(),
        }
    }
}

impl PseoConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_url(&self.base_url) {
            return Err(ConfigError::Validation(
                "base_url must start with http:// or https://".into(),
            ));
        }
        if self.limits.title_min > self.limits.title_max {
            return Err(ConfigError::Validation(
                "limits.title_min must not exceed limits.title_max".into(),
            ));
        }
        if self.limits.description_min > self.limits.description_max {
            return Err(ConfigError::Validation(
                "limits.description_min must not exceed limits.description_max".into(),
            ));
        }
        if self.generation.default_max_combinations == 0 {
            return Err(ConfigError::Validation(
                "generation.default_max_combinations must be at least 1".into(),
            ));
        }
        if let Some(template) = self
            .templates
            .iter()
            .find(|t| t.max_combinations == Some(0))
        {
            return Err(ConfigError::Validation(format!(
                "template '{}': max_combinations must be at least 1",
                template.name
            )));
        }
        Ok(())
    }

    /// Register every configured template into a fresh registry.
    ///
    /// Fails on the first duplicate template name.
    pub fn registry(&self) -> Result<TemplateRegistry, RegistryError> {
        let mut registry =
            TemplateRegistry::with_default_cap(self.generation.default_max_combinations);
        for template in &self.templates {
            registry.register(template.clone())?;
        }
        Ok(registry)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PseoConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
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

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PseoConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PseoConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a `pseo.toml` file.
///
/// A missing file yields the stock defaults with no templates. When
/// `templates_dir` is set, its template files are appended after the inline
/// templates.
pub fn load_config(path: &Path) -> Result<PseoConfig, ConfigError> {
    let overlay = if path.exists() {
        let content = fs::read_to_string(path)?;
        Some(toml::from_str::<toml::Value>(&content)?)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        None
    };
    let mut config = resolve_config(stock_defaults_value(), overlay)?;

    if let Some(dir) = &config.templates_dir {
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        let extra = load_template_dir(&root.join(dir))?;
        config.templates.extend(extra);
        config.validate()?;
    }
    Ok(config)
}

/// Parse every `*.toml` file under `dir` as one template.
///
/// Files are read in sorted path order so registration order is stable.
pub fn load_template_dir(dir: &Path) -> Result<Vec<TemplateConfig>, ConfigError> {
    let mut templates = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        let is_toml = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);
        if !entry.file_type().is_file() || !is_toml {
            continue;
        }
        let content = fs::read_to_string(path)?;
        let template: TemplateConfig =
            toml::from_str(&content).map_err(|source| ConfigError::TemplateFile {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), template = %template.name, "loaded template file");
        templates.push(template);
    }
    Ok(templates)
}

/// Returns a fully-commented stock `pseo.toml` with an example template.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# pseo Configuration
# ==================
# All top-level settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Prefix for every canonical URL. Must start with http:// or https://.
base_url = "https://example.com"

# Directory of extra template files (one template per *.toml file),
# relative to this config file.
# templates_dir = "templates"

# ---------------------------------------------------------------------------
# Site identity (publisher/author defaults for JSON-LD)
# ---------------------------------------------------------------------------
[site]
name = "File Transfer"
# logo = "https://example.com/logo.png"
# description = "Send files directly between devices."
same_as = []

# ---------------------------------------------------------------------------
# Generation
# ---------------------------------------------------------------------------
[generation]
# Cap for templates that don't set their own max_combinations.
default_max_combinations = 100

# Attach WebPage / Article / BreadcrumbList JSON-LD to generated pages.
include_structured_data = false

# Appended to every page's keyword list.
generic_keywords = ["file transfer", "send files online", "peer to peer file sharing"]

# ---------------------------------------------------------------------------
# Validation limits (characters)
# ---------------------------------------------------------------------------
[limits]
title_min = 10
title_max = 60
description_min = 50
description_max = 160

# ---------------------------------------------------------------------------
# Templates
# ---------------------------------------------------------------------------
# Each {token} in title/description must be a declared variable, and each
# variable must be used. Variables are enumerated in the order written here,
# first variable outermost.
[[templates]]
name = "device-transfer"
title = "Send Files from {device1} to {device2}"
description = "Transfer photos, videos and documents from {device1} to {device2} directly. No uploads, no size limits."
url_pattern = "send-file-from-{device1}-to-{device2}"
max_combinations = 50
# "device-transfer" or { strategy = "pattern", primary = "send {device1} files" }
keywords = { strategy = "device-transfer" }

[templates.variables]
device1 = ["iPhone", "Android", "Mac"]
device2 = ["Windows PC", "Mac", "Linux"]
"##
}
