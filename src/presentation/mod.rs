//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating the run controller with infrastructure dependencies
//! - Writing the generated import file
//!
//! ## Structure
//!
//! - `cli` - Flag definitions and mode resolution
//! - `factory` - Wires adapters into the run controller (dependency injection)
//! - `output` - Import file destination

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, ColorWhen};
pub use factory::create_run_controller;
pub use output::{write_import_batch, ImportDestination};
