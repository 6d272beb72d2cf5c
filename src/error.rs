//! Error types for addext operations.
//!
//! This module defines [`AddextError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Fatal errors (registry unusable, identifier missing) bubble up to `main`
//!   and decide the process exit code via [`AddextError::exit_code`]
//! - Per-document and per-file errors are caught where they happen and turned
//!   into report lines, so a batch never stops on one bad input
//! - Use `anyhow::Error` (via `AddextError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for registry failures.
pub const EXIT_REGISTRY: u8 = 2;

/// Exit code when the identification tool cannot be run (EX_UNAVAILABLE).
pub const EXIT_UNAVAILABLE: u8 = 69;

/// Core error type for addext operations.
#[derive(Debug, Error)]
pub enum AddextError {
    /// No registry exists at the expected location.
    #[error("Format registry not found: {path}")]
    RegistryNotFound { path: PathBuf },

    /// A serialized registry could not be parsed.
    #[error("Failed to parse format registry at {path}: {message}")]
    RegistryParseError { path: PathBuf, message: String },

    /// A corpus directory produced no usable format records.
    #[error("No usable format definitions in {path}: {message}")]
    EmptyCorpus { path: PathBuf, message: String },

    /// A single format-definition document was malformed.
    #[error("Malformed format definition {path}: {message}")]
    DocumentError { path: PathBuf, message: String },

    /// The identification tool is missing or cannot be started.
    #[error("Identification tool '{tool}' is unavailable: {message}")]
    IdentifierUnavailable { tool: String, message: String },

    /// Identification failed for one file.
    #[error("Could not identify {path}: {message}")]
    IdentificationFailed { path: PathBuf, message: String },

    /// A rename target is already taken.
    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// An interactive prompt could not be shown or answered.
    #[error("Prompt failed: {message}")]
    PromptFailed { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AddextError {
    /// Process exit code for this error when it ends the run.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::RegistryNotFound { .. }
            | Self::RegistryParseError { .. }
            | Self::EmptyCorpus { .. } => EXIT_REGISTRY,
            Self::IdentifierUnavailable { .. } => EXIT_UNAVAILABLE,
            _ => 1,
        }
    }
}

/// Result type alias for addext operations.
pub type Result<T> = std::result::Result<T, AddextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_not_found_displays_path() {
        let err = AddextError::RegistryNotFound {
            path: PathBuf::from("/opt/addext/pronom.json"),
        };
        assert!(err.to_string().contains("/opt/addext/pronom.json"));
    }

    #[test]
    fn registry_parse_error_displays_path_and_message() {
        let err = AddextError::RegistryParseError {
            path: PathBuf::from("/pronom.json"),
            message: "expected value at line 1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/pronom.json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn document_error_displays_path_and_message() {
        let err = AddextError::DocumentError {
            path: PathBuf::from("puid.fmt.17.xml"),
            message: "missing FormatName".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("puid.fmt.17.xml"));
        assert!(msg.contains("missing FormatName"));
    }

    #[test]
    fn identifier_unavailable_displays_tool() {
        let err = AddextError::IdentifierUnavailable {
            tool: "sf".into(),
            message: "No such file or directory".into(),
        };
        assert!(err.to_string().contains("'sf'"));
    }

    #[test]
    fn destination_exists_displays_path() {
        let err = AddextError::DestinationExists {
            path: PathBuf::from("/data/animation.mov"),
        };
        assert!(err.to_string().contains("/data/animation.mov"));
    }

    #[test]
    fn registry_errors_exit_with_registry_code() {
        let err = AddextError::RegistryNotFound {
            path: PathBuf::from("x"),
        };
        assert_eq!(err.exit_code(), EXIT_REGISTRY);

        let err = AddextError::EmptyCorpus {
            path: PathBuf::from("x"),
            message: "no documents".into(),
        };
        assert_eq!(err.exit_code(), EXIT_REGISTRY);
    }

    #[test]
    fn identifier_unavailable_exits_unavailable() {
        let err = AddextError::IdentifierUnavailable {
            tool: "sf".into(),
            message: "missing".into(),
        };
        assert_eq!(err.exit_code(), EXIT_UNAVAILABLE);
    }

    #[test]
    fn other_errors_exit_one() {
        let err = AddextError::DestinationExists {
            path: PathBuf::from("x"),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: AddextError = io_err.into();
        assert!(matches!(err, AddextError::Io(_)));
    }
}
