//! Per-file outcome lines and run totals.
//!
//! Every processed path produces exactly one [`FileReport`], whose
//! `Display` form is the line shown to the user and written to the run log.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::AddextError;
use crate::resolve::{Action, RenameDecision};

/// Log target for per-file report lines.
pub const REPORT_TARGET: &str = "addext::report";

/// What actually happened to the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Left as it is.
    Skipped,
    /// Dry run; the decision was only reported.
    Previewed,
    /// Renamed on disk.
    Renamed { to: PathBuf },
    /// Identification, prompting or renaming failed for this file.
    Failed { error: String },
}

/// The reported outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Absent when the file failed before a decision was reached.
    pub decision: Option<RenameDecision>,
    pub outcome: Outcome,
}

impl FileReport {
    /// Create a report.
    pub fn new(path: &Path, decision: Option<RenameDecision>, outcome: Outcome) -> Self {
        Self {
            path: path.to_path_buf(),
            decision,
            outcome,
        }
    }

    /// Create a failure report from an error.
    pub fn failed(path: &Path, decision: Option<RenameDecision>, error: &AddextError) -> Self {
        Self::new(
            path,
            decision,
            Outcome::Failed {
                error: error.to_string(),
            },
        )
    }

    /// Report for a symbolic link or other entry that is not a regular file.
    ///
    /// Links are never followed, so their targets are not identified.
    pub fn not_regular(path: &Path) -> Self {
        Self::new(path, None, Outcome::Skipped)
    }

    /// File name of the original path.
    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Whether the report line belongs to a skipped file.
    pub fn is_skip(&self) -> bool {
        matches!(self.outcome, Outcome::Skipped)
    }

    /// Whether the file failed.
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        let format = self.decision.as_ref().and_then(|d| d.format.as_ref());

        if let Outcome::Failed { error } = &self.outcome {
            return match format {
                Some(fmt_info) => write!(
                    f,
                    "Error processing file {} ({}, {}): {}",
                    path, fmt_info.name, fmt_info.code, error
                ),
                None => write!(f, "Error processing file {}: {}", path, error),
            };
        }

        let Some(decision) = &self.decision else {
            return write!(f, "File {} is not a regular file. Skipping file.", path);
        };

        let head = match format {
            Some(fmt_info) => format!(
                "File {} is format {} ({}).",
                path, fmt_info.name, fmt_info.code
            ),
            None => format!("File {}", path),
        };
        let basename = self.basename();

        match decision.action {
            Action::SkipUnidentified => write!(f, "File {} not identified. Skipping file.", path),
            Action::SkipNoExtensionsRegistered | Action::SkipAlreadyCorrect | Action::SkipByUser => {
                write!(f, "{} {}. Skipping file.", head, decision.reason)
            }
            Action::PromptRename => write!(
                f,
                "{} Possible extensions: {}",
                head,
                decision.candidates.join(", ")
            ),
            Action::PreviewRename => write!(
                f,
                "{} Would rename {} -> {}",
                head,
                basename,
                decision.new_name(&basename).unwrap_or_default()
            ),
            Action::Rename => {
                let new_name = match &self.outcome {
                    Outcome::Renamed { to } => to
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    _ => decision.new_name(&basename).unwrap_or_default(),
                };
                write!(f, "{} Renamed {} -> {}", head, basename, new_name)
            }
        }
    }
}

/// Write a report line to the run log.
pub fn log_report(report: &FileReport) {
    if report.is_failure() {
        tracing::warn!(target: REPORT_TARGET, "{}", report);
    } else {
        tracing::info!(target: REPORT_TARGET, "{}", report);
    }
}

/// Totals for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub renamed: usize,
    pub previewed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Count one report.
    pub fn record(&mut self, report: &FileReport) {
        match report.outcome {
            Outcome::Skipped => self.skipped += 1,
            Outcome::Previewed => self.previewed += 1,
            Outcome::Renamed { .. } => self.renamed += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Number of files reported.
    pub fn total(&self) -> usize {
        self.renamed + self.previewed + self.skipped + self.failed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files = if self.total() == 1 { "file" } else { "files" };
        write!(
            f,
            "{} {}: {} renamed, {} previewed, {} skipped, {} failed",
            self.total(),
            files,
            self.renamed,
            self.previewed,
            self.skipped,
            self.failed
        )
    }
}
