//! Configuration module for codetags.
//!
//! Settings are layered, later sources winning:
//! - Default values
//! - TOML configuration file (`.codetags/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the caller)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `CODETAGS_` and use double
//! underscores to separate nested levels:
//! - `CODETAGS_OUTPUT__SORT=false` sets `output.sort`
//! - `CODETAGS_FIELDS__LANGUAGE=Rust` sets `fields.language`
//! - `CODETAGS_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{TagError, TagResult};

pub const CONFIG_DIR: &str = ".codetags";
pub const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "CODETAGS_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Output behavior
    #[serde(default)]
    pub output: OutputConfig,

    /// Extension field values
    #[serde(default)]
    pub fields: FieldsConfig,

    /// Log levels
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Sort tag lines before writing
    #[serde(default = "default_true")]
    pub sort: bool,

    /// Rewrite file paths relative to the directory holding the tags file
    #[serde(default)]
    pub relative: bool,

    /// Do not report per-file errors
    #[serde(default)]
    pub silent: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FieldsConfig {
    /// Value of the `language` field when `--fields +l` is given
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for all targets
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `codetags::pipeline = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 { 1 }
fn default_true() -> bool { true }
fn default_language() -> String { "Go".to_string() }
fn default_log_level() -> String { "warn".to_string() }

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            output: OutputConfig::default(),
            fields: FieldsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sort: true,
            relative: false,
            silent: false,
        }
    }
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources, finding the settings file by
    /// searching upward from the current directory.
    pub fn load() -> TagResult<Self> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file. A missing file is not an
    /// error; defaults and environment still apply.
    pub fn load_from(path: impl AsRef<Path>) -> TagResult<Self> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels; single underscores
            // stay inside field names
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(|e| TagError::Config(e.to_string()))
    }

    /// Find `.codetags/settings.toml` in the current directory or an ancestor.
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join(CONFIG_FILE));
            }
        }

        None
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> TagResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| TagError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let toml_string = self.to_toml()?;
        std::fs::write(path, toml_string).map_err(|source| TagError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> TagResult<String> {
        toml::to_string_pretty(self).map_err(|e| TagError::Config(e.to_string()))
    }

    /// Create a default settings file under `root`.
    pub fn init_config_file(root: &Path, force: bool) -> TagResult<PathBuf> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err(TagError::Config(format!(
                "Configuration file already exists at {}. Use --force to overwrite",
                config_path.display()
            )));
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}
