//! Settings for addext.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Settings File Locations
//!
//! addext layers settings in this order (later wins), unless `--config`
//! names a file explicitly:
//! 1. User config (`~/.addext/config.yml`)
//! 2. Project config (`./.addext.yml`)
//!
//! Command-line flags and `ADDEXT_*` environment variables override both.

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_file, parse_config, ConfigPaths, PROJECT_CONFIG_FILE};
pub use schema::AddextConfig;
