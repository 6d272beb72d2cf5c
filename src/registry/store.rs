//! Serialized registry files.
//!
//! The on-disk format is the pretty-printed JSON map written by
//! `addext build-registry`, keyed by PUID.

use std::fs;
use std::path::Path;

use crate::error::{AddextError, Result};

use super::record::Registry;

/// Load a registry from a JSON file.
///
/// # Errors
///
/// Returns `RegistryNotFound` if the file doesn't exist and
/// `RegistryParseError` if the JSON is invalid.
pub fn load_registry(path: &Path) -> Result<Registry> {
    if !path.exists() {
        return Err(AddextError::RegistryNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| AddextError::RegistryParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut registry: Registry =
        serde_json::from_str(&content).map_err(|e| AddextError::RegistryParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let discarded = registry.discard_blank_codes();
    if discarded > 0 {
        tracing::debug!(
            "Ignored {} registry entries without a format code in {}",
            discarded,
            path.display()
        );
    }

    tracing::debug!("Loaded {} formats from {}", registry.len(), path.display());
    Ok(registry)
}

/// Write a registry as pretty JSON, creating parent directories.
pub fn save_registry(registry: &Registry, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(registry)
        .map_err(|e| AddextError::Other(anyhow::anyhow!("Failed to serialize registry: {e}")))?;
    fs::write(path, json)?;
    Ok(())
}
