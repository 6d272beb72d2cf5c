//! Extension resolution.
//!
//! - [`decision`] - the [`Action`] and [`RenameDecision`] types
//! - [`engine`] - the [`ResolutionEngine`], [`Mode`] and [`Chooser`] capability
//! - [`rename`] - no-clobber renames

pub mod decision;
pub mod engine;
pub mod rename;

pub use decision::{Action, FormatInfo, RenameDecision};
pub use engine::{Choice, Chooser, Mode, NoChooser, ResolutionEngine};
pub use rename::{appended_path, rename_no_clobber};
