//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::AddextConfig;
use crate::error::{AddextError, Result};
use crate::registry::RegistrySource;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: u8) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Report a run-ending error and turn it into a failure result.
    pub fn fatal(ui: &mut dyn UserInterface, error: &AddextError) -> Self {
        ui.error(&format!("Error: {}", error));
        match error {
            AddextError::RegistryNotFound { path } => ui.message(&format!(
                "Hint: build one with `addext build-registry <PRONOM_XML_DIR> {}`",
                path.display()
            )),
            AddextError::IdentifierUnavailable { .. } => ui.message(
                "Hint: install siegfried, pass --sf <BIN>, or use --sf-json with an existing report",
            ),
            _ => {}
        }
        Self::failure(error.exit_code())
    }
}

/// Pick the registry source: flag or environment, then settings, then the
/// default location. Relative paths resolve against `working_dir`.
pub fn registry_source(
    working_dir: &Path,
    flag: Option<&Path>,
    config: &AddextConfig,
) -> RegistrySource {
    match flag.or(config.registry.as_deref()) {
        Some(path) => RegistrySource::from_path(working_dir.join(path)),
        None => RegistrySource::default_location(),
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
    config: AddextConfig,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given working directory and settings.
    pub fn new(working_dir: PathBuf, config: AddextConfig) -> Self {
        Self {
            working_dir,
            config,
        }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Run(args) => {
                let cmd =
                    super::run::RunCommand::new(&self.working_dir, &self.config, args.clone());
                cmd.execute(ui)
            }
            Commands::BuildRegistry(args) => {
                let cmd = super::build_registry::BuildRegistryCommand::new(
                    &self.working_dir,
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::Lookup(args) => {
                let cmd =
                    super::lookup::LookupCommand::new(&self.working_dir, &self.config, args.clone());
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
