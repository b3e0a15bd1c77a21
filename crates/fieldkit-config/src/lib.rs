//! TOML configuration for fieldkit.
//!
//! Configuration is read once by the caller (usually the schema-binding
//! layer) and handed to field constructors and the observability module.
//! Nothing in this crate is global; a missing file yields defaults.

use fieldkit_primitives::CaseFold;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

/// Conventional file name looked up by [`Config::load_or_default`].
pub const CONFIG_FILE: &str = "fieldkit.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub text: TextConfig,
    pub metrics: MetricsConfig,
}

impl Config {
    /// Parse a configuration document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        log::debug!(
            "fieldkit config parsed: case_fold={:?} metrics={}",
            config.text.case_fold,
            config.metrics.enabled
        );

        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    /// Read `fieldkit.toml` from `dir`, falling back to defaults when absent.
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("no {CONFIG_FILE} in {}, using defaults", dir.as_ref().display());
            return Ok(Self::default());
        }

        Self::from_path(path)
    }

    /// Case folding applied by case-insensitive text predicates.
    #[must_use]
    pub const fn case_fold(&self) -> CaseFold {
        self.text.case_fold.to_case_fold()
    }
}

///
/// TextConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    pub case_fold: CaseFoldSetting,
}

///
/// CaseFoldSetting
///
/// Serialized form of [`CaseFold`].
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CaseFoldSetting {
    #[default]
    Unicode,
    Ascii,
}

impl CaseFoldSetting {
    #[must_use]
    pub const fn to_case_fold(self) -> CaseFold {
        match self {
            Self::Unicode => CaseFold::Unicode,
            Self::Ascii => CaseFold::Ascii,
        }
    }
}

///
/// MetricsConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

///
/// TESTS
///
