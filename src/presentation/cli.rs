//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - The five mode flags are independent booleans; exactly one must be set,
//!   which is checked after parsing so the error names every mode
//! - `-v` selects validate mode, so verbosity is long-only (`--verbose`)

use std::path::PathBuf;

use clap::Parser;

use crate::domain::value_objects::RunMode;
use crate::error::ListSyncResult;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// listsync - reconcile band mailing lists against the roster
#[derive(Parser, Debug)]
#[command(name = "listsync")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Choose exactly one of -r, -g, -v, -u, -c. \
                  Clear asks for confirmation unless --yes is given."
)]
pub struct Cli {
    /// Report roster members missing from each mailing list
    #[arg(short = 'r', long)]
    pub report: bool,

    /// Generate a Google Groups import CSV of the missing members
    #[arg(short = 'g', long)]
    pub generate: bool,

    /// Validate mail domains (MX records) of the missing members
    #[arg(short = 'v', long)]
    pub validate: bool,

    /// Add the missing members to each mailing list
    #[arg(short = 'u', long)]
    pub update: bool,

    /// Remove every member from each mailing list
    #[arg(short = 'c', long)]
    pub clear: bool,

    /// Config file (default: ./listsync.toml, then the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Roster CSV export
    #[arg(long, value_name = "PATH")]
    pub roster: Option<PathBuf>,

    /// OAuth token cache
    #[arg(long, value_name = "PATH")]
    pub token: Option<PathBuf>,

    /// Write the generated import CSV here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Only process these mailing lists (repeatable)
    #[arg(long = "only", value_name = "LIST")]
    pub only: Vec<String>,

    /// Skip the clear confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Log more (--verbose for info, twice for debug)
    #[arg(long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The single selected run mode
    pub fn mode(&self) -> ListSyncResult<RunMode> {
        RunMode::from_flags(
            self.report,
            self.generate,
            self.validate,
            self.update,
            self.clear,
        )
    }
}
