//! Build-registry command implementation.
//!
//! `addext build-registry` turns a PRONOM XML export into the JSON registry
//! read by `addext run`.

use std::path::{Path, PathBuf};

use crate::cli::args::BuildRegistryArgs;
use crate::error::Result;
use crate::registry::{save_registry, BuildReport, RegistryBuilder};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The build-registry command implementation.
pub struct BuildRegistryCommand {
    corpus: PathBuf,
    output: PathBuf,
}

impl BuildRegistryCommand {
    /// Create a new build-registry command.
    pub fn new(working_dir: &Path, args: BuildRegistryArgs) -> Self {
        Self {
            corpus: working_dir.join(args.corpus),
            output: working_dir.join(args.output),
        }
    }

    fn build(&self, ui: &mut dyn UserInterface) -> Result<BuildReport> {
        let mut spinner = ui.start_spinner(&format!(
            "Reading format definitions in {}",
            self.corpus.display()
        ));
        let result = RegistryBuilder::new(&self.corpus).build();
        match &result {
            Ok(report) => spinner.finish_success(&format!(
                "Read {} documents from {}",
                report.documents_read,
                self.corpus.display()
            )),
            Err(_) => spinner.finish_clear(),
        }
        result
    }
}

impl Command for BuildRegistryCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = match self.build(ui) {
            Ok(report) => report,
            Err(e) => return Ok(CommandResult::fatal(ui, &e)),
        };

        if let Err(e) = save_registry(&report.registry, &self.output) {
            return Ok(CommandResult::fatal(ui, &e));
        }

        ui.success(&format!(
            "Wrote {} formats to {}",
            report.registry.len(),
            self.output.display()
        ));

        if !report.skipped.is_empty() {
            ui.warning(&format!(
                "{} documents could not be parsed",
                report.skipped.len()
            ));
            if ui.output_mode().shows_details() {
                for skipped in &report.skipped {
                    ui.message(&format!("  {}: {}", skipped.path.display(), skipped.reason));
                }
            }
        }
        if report.records_without_code > 0 {
            ui.message(&format!(
                "{} formats had no PUID and were left out",
                report.records_without_code
            ));
        }
        if report.duplicates > 0 && ui.output_mode().shows_details() {
            ui.message(&format!(
                "{} duplicate PUIDs replaced earlier records",
                report.duplicates
            ));
        }

        Ok(CommandResult::success())
    }
}
