//! PRONOM format registry.
//!
//! This module maps format codes (PUIDs) to format names, versions and
//! registered file extensions:
//! - Records and the immutable [`Registry`] in [`record`]
//! - Building from a PRONOM XML export in [`builder`]
//! - JSON persistence in [`store`]
//! - Choosing between a JSON file and an XML corpus in [`source`]
//!
//! # Example
//!
//! ```
//! use addext::registry::{FormatRecord, Registry};
//!
//! let mut registry = Registry::new();
//! registry
//!     .insert("x-fmt/384", FormatRecord::new("Quicktime", "", ["mov"]))
//!     .unwrap();
//!
//! let record = registry.get("x-fmt/384").unwrap();
//! assert_eq!(record.default_extension(), Some("mov"));
//! ```

pub mod builder;
pub mod record;
pub mod source;
pub mod store;

pub use builder::{
    parse_document, read_document, BuildReport, ParsedFormat, RegistryBuilder, SkippedDocument,
};
pub use record::{normalize_extension, FormatRecord, Registry};
pub use source::{LoadedRegistry, RegistrySource, DEFAULT_REGISTRY_FILE};
pub use store::{load_registry, save_registry};
