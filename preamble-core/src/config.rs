//! YAML configuration for a synchronization run.
//!
//! # Lookup
//!
//! ```text
//! --config <file>          explicit file, must exist
//! ./.preamble.yaml         used when present
//! (defaults)               otherwise
//! ```
//!
//! Every field is optional; omitted fields take the defaults below. Unknown
//! keys are rejected so a typo does not silently fall back to a default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{BACKUP_SUFFIX, DEFAULT_LABEL, TEMP_SUFFIX, WRITE_SUFFIX};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".preamble.yaml";

/// Settings shared by every file of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Product label line shown under the banner.
    pub label: String,
    /// Prepend a preamble to files that have none.
    pub insert_missing: bool,
    /// A candidate path must contain every one of these tokens.
    pub include: Vec<String>,
    /// A candidate path containing any of these tokens is skipped.
    pub exclude: Vec<String>,
    /// Optional FIGlet `.flf` font used instead of the built-in standard font.
    pub font: Option<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            insert_missing: true,
            include: default_include(),
            exclude: default_exclude(),
            font: None,
        }
    }
}

pub fn default_include() -> Vec<String> {
    vec![".py".to_string()]
}

pub fn default_exclude() -> Vec<String> {
    vec![
        BACKUP_SUFFIX.to_string(),
        TEMP_SUFFIX.to_string(),
        WRITE_SUFFIX.to_string(),
        "__init__.py".to_string(),
    ]
}

/// `<dir>/.preamble.yaml` — pure, no I/O.
pub fn config_path_at(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load a configuration file.
///
/// Returns `ConfigError::NotFound` if absent, `ConfigError::Parse` (with path
/// and serde_yaml location) if malformed.
pub fn load(path: &Path) -> Result<SyncConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if contents.trim().is_empty() {
        return Ok(SyncConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load `<dir>/.preamble.yaml`, or the defaults when the file does not exist.
pub fn load_or_default_at(dir: &Path) -> Result<SyncConfig, ConfigError> {
    let path = config_path_at(dir);
    if !path.exists() {
        return Ok(SyncConfig::default());
    }
    load(&path)
}
