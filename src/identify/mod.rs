//! File format identification.
//!
//! Identification itself is delegated to an external tool. This module
//! defines what the rest of the crate sees of it:
//! - [`IdentificationResult`], the ordered list of candidate matches for a file
//! - [`Identifier`], the capability that produces them
//! - [`siegfried`], identifiers backed by the `sf` tool or its JSON reports

pub mod siegfried;

use std::path::Path;

use crate::error::Result;

pub use siegfried::{Siegfried, SiegfriedReport, DEFAULT_SF_BINARY};

/// Namespace whose matches carry PRONOM format codes.
pub const PRONOM_NAMESPACE: &str = "pronom";

/// One candidate match reported by the identification tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatMatch {
    /// Identifier namespace (e.g. `pronom`, `mime`, `tika`).
    pub namespace: String,
    /// Format code within that namespace.
    pub format_code: String,
    /// Format name as reported by the tool, if any.
    pub format_name: Option<String>,
}

impl FormatMatch {
    /// Create a match without a reported format name.
    pub fn new(namespace: impl Into<String>, format_code: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            format_code: format_code.into(),
            format_name: None,
        }
    }

    /// Attach the tool's format name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.format_name = (!name.is_empty()).then_some(name);
        self
    }
}

/// All matches reported for one file, in tool order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentificationResult {
    pub matches: Vec<FormatMatch>,
}

impl IdentificationResult {
    /// Create a result from matches.
    pub fn new(matches: Vec<FormatMatch>) -> Self {
        Self { matches }
    }

    /// A result with no matches.
    pub fn unidentified() -> Self {
        Self::default()
    }

    /// The match that decides the file's format in `namespace`.
    ///
    /// Scans the whole list and keeps the *last* match in the namespace, so a
    /// later, more specific match overrides an earlier one.
    pub fn resolved_match(&self, namespace: &str) -> Option<&FormatMatch> {
        self.matches
            .iter()
            .filter(|m| m.namespace == namespace)
            .fold(None, |_, m| Some(m))
    }

    /// Format code of [`resolved_match`](Self::resolved_match).
    pub fn resolved_code(&self, namespace: &str) -> Option<&str> {
        self.resolved_match(namespace)
            .map(|m| m.format_code.as_str())
    }
}

/// Capability that identifies one file.
///
/// Implementations return `IdentifierUnavailable` when the underlying tool
/// cannot run at all (fatal for the whole run) and `IdentificationFailed`
/// when only this file could not be identified.
pub trait Identifier {
    /// Identify the file at `path`.
    fn identify(&self, path: &Path) -> Result<IdentificationResult>;
}
