//! CLI configuration file.
//!
//! One TOML file carries the indexing setup, the vectorizer options and the
//! record store location:
//!
//! ```toml
//! languages = ["en-US", "fr", "it"]
//!
//! [[indexes]]
//! name = "title"
//! fields = ["title"]
//!
//! [vectorizer]
//! backend = "tantivy"
//!
//! [store]
//! path = "~/.local/share/mlindex/records.json"
//! ```
//!
//! The file is looked up at `--config` (or `MLINDEX_CONFIG`), then at
//! `<config dir>/mlindex/config.toml`. Without a file the defaults apply.

use std::path::{Path, PathBuf};

use mlindex_core::{Error, IndexingConfig, Result};
use mlindex_fts::VectorizerConfig;
use serde::{Deserialize, Serialize};

/// Directory name under the platform config directory.
pub const PROJECT_NAME: &str = "mlindex";

/// Config file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Record store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON record store file. `~` is expanded.
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    "~/.local/share/mlindex/records.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl StoreConfig {
    /// Store path with `~` and environment variables expanded.
    pub fn resolved_path(&self) -> PathBuf {
        match shellexpand::full(&self.path) {
            Ok(expanded) => PathBuf::from(expanded.into_owned()),
            Err(e) => {
                log::warn!("Could not expand store path '{}': {e}", self.path);
                PathBuf::from(shellexpand::tilde(&self.path).into_owned())
            }
        }
    }
}

/// Full CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlindexConfig {
    /// Locales and index groups (top-level keys).
    #[serde(flatten)]
    pub indexing: IndexingConfig,

    /// Text analysis backend.
    #[serde(default)]
    pub vectorizer: VectorizerConfig,

    /// Record store location.
    #[serde(default)]
    pub store: StoreConfig,
}

impl MlindexConfig {
    /// `<config dir>/mlindex/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join(CONFIG_FILE))
    }

    /// The explicit path if given, otherwise the default path.
    pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path)
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => {
                log::debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            Some(path) if explicit.is_some() => Err(Error::config(format!(
                "Config file not found: {}",
                path.display()
            ))),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::parse(format!("Invalid config: {e}")))?;
        config.indexing.validate()?;
        Ok(config)
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Record store file, `~` expanded.
    pub fn store_path(&self) -> PathBuf {
        self.store.resolved_path()
    }
}

// ============================================================================
// Tests
// ============================================================================
