//! Configuration module for listsync
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (LISTSYNC_*)
//! 3. Explicit `--config` file, else `./listsync.toml`, else
//!    `<config dir>/listsync/config.toml`
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    load_resolved, parse_with_warnings, resolve_config_path, PROJECT_CONFIG_FILE,
};
pub use types::{
    BaselineConfig, CatalogConfig, ColorMode, Config, OutputConfig, RemoteConfig, RosterColumns,
    RosterConfig, SegmentEntry, ValidatorConfig, DEFAULT_DIRECTORY_API, DEFAULT_LIST_DOMAIN,
};
