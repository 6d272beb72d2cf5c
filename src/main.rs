//! addext CLI entry point.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use addext::cli::commands::run::log_file_path;
use addext::cli::{Cli, CommandDispatcher, Commands};
use addext::config::load_config;
use addext::ui::{create_ui, OutputMode};
use clap::Parser;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Report lines are printed by the UI, never by the console layer.
const REPORT_OFF: &str = "addext::report=off";

/// Build the console filter.
///
/// Console level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn console_filter(debug: bool, rust_log: Option<&str>) -> EnvFilter {
    let base = if debug {
        "addext=debug"
    } else {
        rust_log.filter(|s| !s.trim().is_empty()).unwrap_or("addext=warn")
    };
    EnvFilter::try_new(format!("{base},{REPORT_OFF}"))
        .unwrap_or_else(|_| EnvFilter::new(format!("addext=warn,{REPORT_OFF}")))
}

/// Initialize the tracing subscriber for logging.
///
/// The run log, when given, receives INFO and above as plain text.
fn init_tracing(debug: bool, run_log: Option<File>) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let console_filter = console_filter(debug, rust_log.as_deref());

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let run_log = run_log.map(|file| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .with_filter(Targets::new().with_target("addext", LevelFilter::INFO))
    });

    tracing_subscriber::registry()
        .with(console)
        .with(run_log)
        .init();
}

fn open_run_log(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Determine output mode
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut ui = create_ui(true, output_mode);
    let working_dir = std::env::current_dir().unwrap_or_default();

    let config = match load_config(&working_dir, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(cli.debug, None);
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(e.exit_code());
        }
    };

    // Only runs keep a log
    let log_path = match &cli.command {
        Commands::Run(args) => log_file_path(&working_dir, args, &config),
        _ => None,
    };
    let mut log_warning = None;
    let run_log = log_path.as_deref().and_then(|path| match open_run_log(path) {
        Ok(file) => Some(file),
        Err(e) => {
            log_warning = Some(format!(
                "Cannot write run log {}: {}; continuing without it",
                path.display(),
                e
            ));
            None
        }
    });

    init_tracing(cli.debug, run_log);
    tracing::debug!("addext starting with args: {:?}", cli);
    if let Some(warning) = log_warning {
        ui.warning(&warning);
    }

    let dispatcher = CommandDispatcher::new(working_dir, config);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(e.exit_code())
        }
    }
}
