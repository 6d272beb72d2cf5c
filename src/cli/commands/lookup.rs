//! Lookup command implementation.

use std::path::{Path, PathBuf};

use crate::cli::args::LookupArgs;
use crate::config::AddextConfig;
use crate::error::Result;
use crate::registry::FormatRecord;
use crate::ui::UserInterface;

use super::dispatcher::{registry_source, Command, CommandResult};

/// The lookup command implementation.
pub struct LookupCommand {
    working_dir: PathBuf,
    config: AddextConfig,
    args: LookupArgs,
}

impl LookupCommand {
    /// Create a new lookup command.
    pub fn new(working_dir: &Path, config: &AddextConfig, args: LookupArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config: config.clone(),
            args,
        }
    }
}

fn describe(code: &str, record: &FormatRecord) -> String {
    let extensions = if record.extensions.is_empty() {
        "(none)".to_string()
    } else {
        record.extensions.join(", ")
    };
    format!(
        "{}: {}. Extensions: {}",
        code,
        record.display_name(),
        extensions
    )
}

impl Command for LookupCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let source = registry_source(&self.working_dir, self.args.registry.as_deref(), &self.config);
        let loaded = match source.load() {
            Ok(loaded) => loaded,
            Err(e) => return Ok(CommandResult::fatal(ui, &e)),
        };

        let mut unknown = 0;
        for code in &self.args.codes {
            match loaded.registry.get(code.trim()) {
                Some(record) => ui.message(&describe(code.trim(), record)),
                None => {
                    ui.error(&format!("Unknown format code: {}", code));
                    unknown += 1;
                }
            }
        }

        if unknown > 0 {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
