//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// addext - Add missing file extensions based on identified file format.
#[derive(Debug, Parser)]
#[command(name = "addext")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides ./.addext.yml and ~/.addext/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output: hide lines for skipped files
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add missing extensions to a file or every file under a directory
    Run(RunArgs),

    /// Build a format registry from a PRONOM XML export
    BuildRegistry(BuildRegistryArgs),

    /// Show registered extensions for format codes
    Lookup(LookupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// File or directory to process
    pub path: PathBuf,

    /// Report what would change without renaming anything
    #[arg(short = 'd', long, visible_alias = "dryrun")]
    pub dry_run: bool,

    /// Ask which extension to use when several are registered
    #[arg(short, long)]
    pub manual: bool,

    /// Registry JSON file or PRONOM XML export directory
    #[arg(long, env = "ADDEXT_REGISTRY", value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Siegfried binary to run
    #[arg(long, env = "ADDEXT_SF", value_name = "BIN")]
    pub sf: Option<String>,

    /// Use an existing Siegfried JSON report instead of running sf
    #[arg(long, value_name = "REPORT")]
    pub sf_json: Option<PathBuf>,

    /// Run log file (default: ./addext.log)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Do not write a run log
    #[arg(long, conflicts_with = "log_file")]
    pub no_log: bool,
}

/// Arguments for the `build-registry` command.
#[derive(Debug, Clone, clap::Args)]
pub struct BuildRegistryArgs {
    /// Directory of PRONOM format XML documents
    pub corpus: PathBuf,

    /// Where to write the registry JSON
    pub output: PathBuf,
}

/// Arguments for the `lookup` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LookupArgs {
    /// Format codes (PUIDs), e.g. fmt/412
    #[arg(required = true)]
    pub codes: Vec<String>,

    /// Registry JSON file or PRONOM XML export directory
    #[arg(long, env = "ADDEXT_REGISTRY", value_name = "PATH")]
    pub registry: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
