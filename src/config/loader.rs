//! Settings file discovery and loading.

use crate::config::schema::AddextConfig;
use crate::error::{AddextError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".addext.yml";

/// Paths to settings files in merge order (later overrides earlier).
///
/// Merge order:
/// 1. User config (`~/.addext/config.yml`)
/// 2. Project config (`./.addext.yml`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User config: ~/.addext/config.yml
    pub user: Option<PathBuf>,

    /// Project config: ./.addext.yml
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover settings files relative to `working_dir`.
    pub fn discover(working_dir: &Path) -> Self {
        Self {
            user: Self::find_user_config(),
            project: Self::find_project_config(working_dir),
        }
    }

    fn find_user_config() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
        let path = PathBuf::from(home).join(".addext").join("config.yml");
        if path.is_file() {
            Some(path)
        } else {
            None
        }
    }

    fn find_project_config(working_dir: &Path) -> Option<PathBuf> {
        let path = working_dir.join(PROJECT_CONFIG_FILE);
        if path.is_file() {
            Some(path)
        } else {
            None
        }
    }

    /// Returns all existing paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.user.iter().chain(self.project.iter()).collect()
    }
}

/// Load a single settings file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read and `ConfigParseError` if the
/// YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<AddextConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse YAML settings.
pub fn parse_config(content: &str, source_path: &Path) -> Result<AddextConfig> {
    if content.trim().is_empty() {
        return Ok(AddextConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| AddextError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load settings.
///
/// An explicit `config_override` is loaded alone. Otherwise the discovered
/// files are layered; having none is not an error.
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<AddextConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }

    let mut config = AddextConfig::default();
    for path in ConfigPaths::discover(working_dir).all_existing() {
        tracing::debug!("Loading settings from {}", path.display());
        config = config.overlay(load_config_file(path)?);
    }
    Ok(config)
}
