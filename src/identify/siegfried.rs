//! Identification with Siegfried (`sf`).
//!
//! Two identifiers share the same JSON parsing:
//! - [`Siegfried`] runs `sf -json <path>` for every file
//! - [`SiegfriedReport`] answers from a report produced earlier with
//!   `sf -json <dir> > report.json`

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{AddextError, Result};

use super::{FormatMatch, IdentificationResult, Identifier};

/// Default Siegfried binary name.
pub const DEFAULT_SF_BINARY: &str = "sf";

/// Siegfried's id for files it could not identify.
const UNKNOWN_ID: &str = "UNKNOWN";

#[derive(Debug, Deserialize)]
struct SfReport {
    #[serde(default)]
    files: Vec<SfFile>,
}

#[derive(Debug, Deserialize)]
struct SfFile {
    filename: String,
    #[serde(default)]
    errors: String,
    #[serde(default)]
    matches: Vec<SfMatch>,
}

#[derive(Debug, Deserialize)]
struct SfMatch {
    ns: String,
    id: String,
    #[serde(default)]
    format: String,
}

impl SfFile {
    fn into_result(self) -> (PathBuf, IdentificationResult) {
        if !self.errors.is_empty() {
            tracing::debug!("sf reported errors for {}: {}", self.filename, self.errors);
        }
        let matches = self
            .matches
            .into_iter()
            .filter(|m| m.id != UNKNOWN_ID)
            .map(|m| FormatMatch::new(m.ns, m.id).with_name(m.format))
            .collect();
        (PathBuf::from(self.filename), IdentificationResult::new(matches))
    }
}

fn parse_report(json: &str) -> std::result::Result<SfReport, serde_json::Error> {
    serde_json::from_str(json)
}

/// Identifier that invokes the `sf` binary once per file.
#[derive(Debug, Clone)]
pub struct Siegfried {
    binary: String,
}

impl Default for Siegfried {
    fn default() -> Self {
        Self::new(DEFAULT_SF_BINARY)
    }
}

impl Siegfried {
    /// Create an identifier for the given binary name or path.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Binary this identifier runs.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn unavailable(&self, message: impl Into<String>) -> AddextError {
        AddextError::IdentifierUnavailable {
            tool: self.binary.clone(),
            message: message.into(),
        }
    }

    /// Check that the binary can be started.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierUnavailable` if `sf -version` cannot be run or
    /// exits unsuccessfully.
    pub fn probe(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.unavailable(e.to_string()))?;

        if !output.status.success() {
            return Err(self.unavailable(format!(
                "'-version' exited with {:?}",
                output.status.code()
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        tracing::debug!("Using {} ({})", self.binary, version);
        Ok(version)
    }
}

impl Identifier for Siegfried {
    fn identify(&self, path: &Path) -> Result<IdentificationResult> {
        let output = Command::new(&self.binary)
            .arg("-json")
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.unavailable(e.to_string()))?;

        let failed = |message: String| AddextError::IdentificationFailed {
            path: path.to_path_buf(),
            message,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!(
                "{} exited with {:?}: {}",
                self.binary,
                output.status.code(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let report = parse_report(&stdout).map_err(|e| failed(format!("invalid sf output: {e}")))?;

        report
            .files
            .into_iter()
            .next()
            .map(|file| file.into_result().1)
            .ok_or_else(|| failed("sf reported no files".to_string()))
    }
}

/// Identifier backed by an existing Siegfried JSON report.
#[derive(Debug, Clone, Default)]
pub struct SiegfriedReport {
    results: HashMap<PathBuf, IdentificationResult>,
}

impl SiegfriedReport {
    /// Load a report file.
    ///
    /// # Errors
    ///
    /// An unreadable or unparseable report is `IdentifierUnavailable`,
    /// since no file can be identified without it.
    pub fn load(path: &Path) -> Result<Self> {
        let unavailable = |message: String| AddextError::IdentifierUnavailable {
            tool: path.display().to_string(),
            message,
        };
        let content = fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        Self::from_json(&content).map_err(|e| unavailable(format!("invalid sf report: {e}")))
    }

    /// Parse report JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let report = parse_report(json)?;
        let results = report
            .files
            .into_iter()
            .map(SfFile::into_result)
            .collect();
        Ok(Self { results })
    }

    /// Number of files in the report.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the report lists no files.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl Identifier for SiegfriedReport {
    fn identify(&self, path: &Path) -> Result<IdentificationResult> {
        if let Some(result) = self.results.get(path) {
            return Ok(result.clone());
        }
        if let Ok(canonical) = path.canonicalize() {
            if let Some(result) = self.results.get(&canonical) {
                return Ok(result.clone());
            }
        }
        Err(AddextError::IdentificationFailed {
            path: path.to_path_buf(),
            message: "not listed in the sf report".to_string(),
        })
    }
}
