//! Run command implementation.
//!
//! The `addext run` command identifies every file under a path and adds
//! the registered extension where one is missing.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::cli::args::RunArgs;
use crate::config::AddextConfig;
use crate::error::{AddextError, Result};
use crate::identify::{Identifier, Siegfried, SiegfriedReport, DEFAULT_SF_BINARY, PRONOM_NAMESPACE};
use crate::registry::{LoadedRegistry, RegistrySource};
use crate::report::{log_report, FileReport, Outcome, RunSummary};
use crate::resolve::{Mode, ResolutionEngine};
use crate::ui::{OutputMode, UiChooser, UserInterface};

use super::dispatcher::{registry_source, Command, CommandResult};

/// Default run log name, created in the working directory.
pub const DEFAULT_LOG_FILE: &str = "addext.log";

/// Where the run log goes, or `None` with `--no-log`.
pub fn log_file_path(working_dir: &Path, args: &RunArgs, config: &AddextConfig) -> Option<PathBuf> {
    if args.no_log {
        return None;
    }
    let path = args
        .log_file
        .as_deref()
        .or(config.log_file.as_deref())
        .unwrap_or_else(|| Path::new(DEFAULT_LOG_FILE));
    Some(working_dir.join(path))
}

/// The run command implementation.
pub struct RunCommand {
    working_dir: PathBuf,
    config: AddextConfig,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(working_dir: &Path, config: &AddextConfig, args: RunArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config: config.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    fn target(&self) -> PathBuf {
        self.working_dir.join(&self.args.path)
    }

    fn mode(&self, ui: &mut dyn UserInterface) -> Mode {
        let mut mode = Mode {
            preview: self.args.dry_run,
            interactive: self.args.manual,
        };
        if mode.interactive && !ui.is_interactive() {
            ui.warning("--manual needs an interactive terminal; using the first registered extension");
            mode.interactive = false;
        }
        mode
    }

    fn load_registry(&self, ui: &mut dyn UserInterface) -> Result<LoadedRegistry> {
        let source = registry_source(&self.working_dir, self.args.registry.as_deref(), &self.config);
        let mut spinner = ui.start_spinner(&format!(
            "Loading format registry from {}",
            source.path().display()
        ));

        let loaded = match source.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                spinner.finish_clear();
                return Err(e);
            }
        };
        spinner.finish_clear();

        tracing::info!(
            "Using format registry {} ({} formats)",
            source.path().display(),
            loaded.registry.len()
        );
        if let (RegistrySource::Corpus(dir), Some(build)) = (&source, &loaded.build) {
            if ui.output_mode().shows_details() {
                ui.message(&format!(
                    "Built registry from {}: {} documents, {} formats, {} skipped",
                    dir.display(),
                    build.documents_read,
                    loaded.registry.len(),
                    build.skipped.len()
                ));
            }
        }
        Ok(loaded)
    }

    fn identifier(&self) -> Result<Box<dyn Identifier>> {
        if let Some(report) = &self.args.sf_json {
            let report = SiegfriedReport::load(&self.working_dir.join(report))?;
            tracing::info!("Using sf report with {} files", report.len());
            return Ok(Box::new(report));
        }

        let binary = self
            .args
            .sf
            .as_deref()
            .or(self.config.sf.as_deref())
            .unwrap_or(DEFAULT_SF_BINARY);
        let sf = Siegfried::new(binary);
        let version = sf.probe()?;
        tracing::info!("Identifying with {}", version);
        Ok(Box::new(sf))
    }

    /// Whether `path` is this run's own log file.
    fn is_log_file(&self, path: &Path) -> bool {
        let Some(log) = log_file_path(&self.working_dir, &self.args, &self.config) else {
            return false;
        };
        if path == log {
            return true;
        }
        match (path.canonicalize(), log.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    fn run(&self, ui: &mut dyn UserInterface) -> Result<RunSummary> {
        let mode = self.mode(ui);
        let loaded = self.load_registry(ui)?;
        let identifier = self.identifier()?;
        let namespace = self
            .config
            .namespace
            .clone()
            .unwrap_or_else(|| PRONOM_NAMESPACE.to_string());
        let engine = ResolutionEngine::new(&loaded.registry, mode).with_namespace(namespace);

        let target = self.target();
        if !target.exists() {
            return Err(AddextError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", target.display()),
            )));
        }

        let mut summary = RunSummary::default();
        for entry in WalkDir::new(&target).sort_by_file_name() {
            let report = match entry {
                Ok(entry) if entry.file_type().is_dir() => continue,
                Ok(entry) if !entry.file_type().is_file() => FileReport::not_regular(entry.path()),
                Ok(entry) => {
                    if self.is_log_file(entry.path()) {
                        continue;
                    }
                    let mut chooser = UiChooser::new(&mut *ui);
                    engine.identify_and_process(entry.path(), identifier.as_ref(), &mut chooser)?
                }
                Err(e) => {
                    let path = e.path().unwrap_or(target.as_path()).to_path_buf();
                    FileReport::failed(&path, None, &AddextError::Io(e.into()))
                }
            };

            log_report(&report);
            show_report(ui, &report);
            summary.record(&report);
        }
        Ok(summary)
    }
}

/// Print one report line with the style matching its outcome.
fn show_report(ui: &mut dyn UserInterface, report: &FileReport) {
    let line = report.to_string();
    match report.outcome {
        Outcome::Renamed { .. } => ui.success(&line),
        Outcome::Previewed => ui.message(&line),
        Outcome::Skipped => ui.skipped(&line),
        Outcome::Failed { .. } => ui.error(&line),
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.dry_run {
            ui.message("Dry run: no files will be renamed");
        }

        let summary = match self.run(ui) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!("Run aborted: {}", e);
                return Ok(CommandResult::fatal(ui, &e));
            }
        };

        tracing::info!("{}", summary);
        if ui.output_mode() != OutputMode::Silent {
            ui.message(&summary.to_string());
        }
        ui.success("Process complete.");
        Ok(CommandResult::success())
    }
}
