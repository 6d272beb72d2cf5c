//! addext - Add missing file extensions based on identified file format.
//!
//! addext identifies files with Siegfried, looks the resulting PRONOM
//! format code (PUID) up in a registry built from a PRONOM XML export, and
//! appends the registered extension when a file does not already carry one.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings file loading
//! - [`error`] - Error types and result aliases
//! - [`identify`] - Format identification via Siegfried
//! - [`registry`] - PUID to format record registry
//! - [`report`] - Per-file outcome lines and run totals
//! - [`resolve`] - Rename decisions and no-clobber renames
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use addext::identify::{FormatMatch, IdentificationResult};
//! use addext::registry::{FormatRecord, Registry};
//! use addext::resolve::{Action, Mode, NoChooser, ResolutionEngine};
//!
//! let mut registry = Registry::new();
//! registry
//!     .insert("x-fmt/384", FormatRecord::new("Quicktime", "", ["mov"]))
//!     .unwrap();
//!
//! let engine = ResolutionEngine::new(&registry, Mode::preview());
//! let identified = IdentificationResult::new(vec![FormatMatch::new("pronom", "x-fmt/384")]);
//! let decision = engine
//!     .decide(Path::new("animation"), &identified, &mut NoChooser)
//!     .unwrap();
//!
//! assert_eq!(decision.action, Action::PreviewRename);
//! assert_eq!(decision.chosen_extension.as_deref(), Some("mov"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod identify;
pub mod registry;
pub mod report;
pub mod resolve;
pub mod ui;

pub use error::{AddextError, Result};
