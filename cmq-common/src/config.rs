//! Configuration loading and reference-file resolution
//!
//! Missing configuration never stops the engine: a missing TOML file logs a
//! warning and falls back to compiled defaults. A file that exists but cannot
//! be parsed, or that carries out-of-range thresholds, is a configuration
//! error because silently ignoring it would change verdicts.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CMQ_CONFIG";

/// Environment variable naming the SPDX license list file
pub const LICENSE_LIST_ENV_VAR: &str = "CMQ_LICENSE_LIST";

/// File name of the license list when no location is configured
pub const DEFAULT_LICENSE_FILE: &str = "licenses.json";

/// Which attribute set the registry exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryMode {
    /// Croissant attribute set (creators, in_language)
    #[default]
    Croissant,
    /// Older form layout (author, year, title, language)
    Legacy,
}

/// Thresholds used by the quality scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Minimum number of keywords
    pub min_keywords: usize,
    /// Minimum MATTR score (0.0-1.0, higher = more diverse)
    pub lexical_diversity_threshold: f64,
    /// Minimum fraction of unique keywords (1.0 = no duplicates)
    pub keyword_uniqueness_threshold: f64,
    /// Minimum number of distinct sentence structures
    pub sentence_variety_threshold: usize,
    /// Window length for MATTR
    pub mattr_window: usize,
    /// Minimum number of words in a title
    pub min_title_words: usize,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_keywords: 3,
            lexical_diversity_threshold: 0.5,
            keyword_uniqueness_threshold: 1.0,
            sentence_variety_threshold: 2,
            mattr_window: 20,
            min_title_words: 3,
        }
    }
}

impl QualityThresholds {
    /// Reject thresholds that would make every verdict meaningless
    pub fn validate(&self) -> Result<()> {
        if self.mattr_window == 0 {
            return Err(Error::Config("mattr_window must be at least 1".to_string()));
        }
        if self.min_keywords == 0 {
            return Err(Error::Config("min_keywords must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.lexical_diversity_threshold) {
            return Err(Error::Config(format!(
                "lexical_diversity_threshold must be within 0.0-1.0, got {}",
                self.lexical_diversity_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.keyword_uniqueness_threshold) {
            return Err(Error::Config(format!(
                "keyword_uniqueness_threshold must be within 0.0-1.0, got {}",
                self.keyword_uniqueness_threshold
            )));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// TOML configuration file contents
///
/// Every field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Path to the SPDX license list (JSON)
    #[serde(default)]
    pub license_list: Option<PathBuf>,

    /// Attribute set exposed by the registry
    #[serde(default)]
    pub registry_mode: RegistryMode,

    /// Quality scorer thresholds
    #[serde(default)]
    pub quality: QualityThresholds,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse configuration from TOML text and validate thresholds
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.quality.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// A missing file yields defaults with a warning. Read or parse failures
    /// on an existing file are errors.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Config file not found at {}, using compiled defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the default location
    ///
    /// `CMQ_CONFIG` wins over the platform config directory. When neither
    /// yields a file, compiled defaults are used.
    pub fn load() -> Result<Self> {
        match config_file_path() {
            Some(path) => Self::load_or_default(&path),
            None => {
                warn!("No config directory available, using compiled defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Default configuration file path for the platform
///
/// `CMQ_CONFIG` takes priority over `<config_dir>/cmq/config.toml`.
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|d| d.join("cmq").join("config.toml"))
}

/// License list resolution following priority order:
/// 1. Explicit argument (highest priority)
/// 2. `CMQ_LICENSE_LIST` environment variable
/// 3. TOML `license_list` key
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_license_list(explicit: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = explicit {
        debug!("License list from explicit argument: {}", path.display());
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(LICENSE_LIST_ENV_VAR) {
        if !path.trim().is_empty() {
            debug!("License list from {}: {}", LICENSE_LIST_ENV_VAR, path);
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.license_list {
        debug!("License list from TOML config: {}", path.display());
        return path.clone();
    }

    default_license_list()
}

/// Get OS-dependent default license list path
pub fn default_license_list() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("cmq").join(DEFAULT_LICENSE_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LICENSE_FILE))
}
