//! Configuration loading and validation.
//!
//! This module handles:
//! - The TOML config file (`[report]`, `[render]`, `[bundle]` sections)
//! - Config resolution order (CLI > env > XDG > defaults)
//! - Semantic validation (class names, plot dimensions)
//! - Config snapshots (path + SHA-256) for bundle manifests

pub mod validation;

pub use validation::{validate_config, ValidationError};

use mq_common::ClassNames;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::evaluate::DEFAULT_TITLE;

/// Default XDG config directory name.
const CONFIG_DIR_NAME: &str = "model_quality";

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MQ_CONFIG";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid TOML in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Semantic validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ConfigError> for mq_common::Error {
    fn from(err: ConfigError) -> Self {
        mq_common::Error::Config(err.to_string())
    }
}

/// Color theme for rendered plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// `[report]` defaults applied when the CLI does not override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSection {
    pub class_names: ClassNames,
    pub title: String,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            class_names: ClassNames::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// `[render]` plot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    /// Width of each SVG panel in pixels.
    pub width: u32,
    /// Height of each SVG panel in pixels.
    pub height: u32,
    pub theme: Theme,
    /// Terminal plot size in characters.
    pub ascii_width: usize,
    pub ascii_height: usize,
    /// Minify the HTML report.
    pub minify: bool,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            width: 480,
            height: 360,
            theme: Theme::Light,
            ascii_width: 50,
            ascii_height: 15,
            minify: true,
        }
    }
}

/// `[bundle]` contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct BundleSection {
    pub include_html: bool,
    pub include_svg: bool,
    pub include_monitor: bool,
}

impl Default for BundleSection {
    fn default() -> Self {
        Self {
            include_html: true,
            include_svg: true,
            include_monitor: true,
        }
    }
}

/// Full configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub report: ReportSection,
    pub render: RenderSection,
    pub bundle: BundleSection,
}

impl Config {
    /// Parse and validate TOML text.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        validate_config(&config)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: Config,
    /// Path to the config file (None if using defaults).
    pub path: Option<PathBuf>,
    /// SHA-256 hash of the config file content (None if using defaults).
    pub hash: Option<String>,
}

impl ResolvedConfig {
    pub fn defaults() -> Self {
        Self {
            config: Config::default(),
            path: None,
            hash: None,
        }
    }

    /// Create a config snapshot for bundle manifests.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            path: self.path.clone(),
            hash: self.hash.clone(),
            source: if self.path.is_some() { "file" } else { "defaults" }.to_string(),
        }
    }
}

/// Config provenance recorded alongside generated artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConfigSnapshot {
    pub path: Option<PathBuf>,
    pub hash: Option<String>,
    pub source: String,
}

/// Configuration resolution options.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    /// Explicit config file (highest priority).
    pub config_path: Option<PathBuf>,
}

/// Load configuration with the standard resolution order.
///
/// Resolution order (highest to lowest priority):
/// 1. Explicit CLI flag (via ConfigOptions)
/// 2. Environment variable (MQ_CONFIG)
/// 3. XDG config home (~/.config/model_quality/config.toml), if present
/// 4. Built-in defaults
///
/// An explicitly named file that does not exist is an error; a missing XDG
/// file is not.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let explicit = options
        .config_path
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    let path = match explicit {
        Some(path) if !path.exists() => return Err(ConfigError::NotFound { path }),
        Some(path) => path,
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!(target: "config.default_used", "no config file, using defaults");
                return Ok(ResolvedConfig::defaults());
            }
        },
    };

    load_config_file(&path)
}

/// Load and validate a specific config file.
pub fn load_config_file(path: &Path) -> Result<ResolvedConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let hash = compute_hash(&content);
    let config = Config::from_toml(&content, path)?;
    debug!(target: "config.loaded", path = %path.display(), hash = %hash, "config loaded");

    Ok(ResolvedConfig {
        config,
        path: Some(path.to_path_buf()),
        hash: Some(hash),
    })
}

/// `$XDG_CONFIG_HOME/model_quality/config.toml`, falling back to `~/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
    Some(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(feature = "report")]
impl From<Theme> for mq_report::ReportTheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => mq_report::ReportTheme::Light,
            Theme::Dark => mq_report::ReportTheme::Dark,
        }
    }
}

#[cfg(feature = "report")]
impl RenderSection {
    /// Renderer settings for this section.
    pub fn report_config(&self, include_html: bool) -> mq_report::ReportConfig {
        mq_report::ReportConfig {
            width: self.width,
            height: self.height,
            theme: self.theme.into(),
            minify: self.minify,
            include_html,
        }
    }
}

/// SHA-256 of the file content, hex encoded.
pub fn compute_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(text: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(text.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&Config::default()).is_ok());
        let config = Config::default();
        assert_eq!(config.report.title, "Model report");
        assert!(config.bundle.include_html);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let (_dir, path) = write_config(
            r#"
[report]
class_names = ["legit", "fraud"]

[render]
theme = "dark"
"#,
        );
        let resolved = load_config(&ConfigOptions {
            config_path: Some(path.clone()),
        })
        .unwrap();
        assert_eq!(resolved.config.report.class_names.positive(), "fraud");
        assert_eq!(resolved.config.report.title, "Model report");
        assert_eq!(resolved.config.render.theme, Theme::Dark);
        assert_eq!(resolved.config.render.width, 480);
        assert_eq!(resolved.path.as_deref(), Some(path.as_path()));
        assert_eq!(resolved.hash.as_ref().map(String::len), Some(64));
    }

    #[test]
    fn unknown_keys_rejected() {
        let (_dir, path) = write_config("[render]\ncolour = \"red\"\n");
        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn semantic_errors_surface() {
        let (_dir, path) = write_config("[report]\nclass_names = [\"same\", \"same\"]\n");
        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let err = load_config(&ConfigOptions {
            config_path: Some(PathBuf::from("/nonexistent/mq/config.toml")),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn hash_is_sha256_hex() {
        assert_eq!(
            compute_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn snapshot_records_source() {
        assert_eq!(ResolvedConfig::defaults().snapshot().source, "defaults");
        let (_dir, path) = write_config("");
        let resolved = load_config_file(&path).unwrap();
        let snap = resolved.snapshot();
        assert_eq!(snap.source, "file");
        assert_eq!(snap.hash.as_deref(), Some(compute_hash("").as_str()));
    }

    #[test]
    fn toml_roundtrip_of_defaults() {
        let text = Config::default().to_toml();
        let parsed = Config::from_toml(&text, Path::new("inline")).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
