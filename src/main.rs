//! listsync - reconcile band mailing lists against the roster
//!
//! Usage: listsync (-r | -g | -v | -u | -c) [OPTIONS]
//!
//! Modes:
//!   -r  report    Show roster/list differences per segment
//!   -g  generate  Write a Google Groups import CSV of missing members
//!   -v  validate  Check the mail domains of missing members
//!   -u  update    Add missing members to each list
//!   -c  clear     Remove every member from each list

use is_terminal::IsTerminal;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use listsync::presentation::{Cli, ColorWhen};

mod commands;
mod ui;

fn main() -> ExitCode {
    let cli = Cli::parse();
    commands::logging::init(cli.verbose);

    let color = error_color(cli.color);

    let mode = match cli.mode() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{}\n", e);
            eprintln!("{}", Cli::command().render_help());
            return ExitCode::from(2);
        }
    };

    match commands::run::cmd_run(&cli, mode) {
        Ok(status) => ExitCode::from(status.exit_code() as u8),
        Err(e) => {
            ui::error::print_error(&e, color);
            ExitCode::from(1)
        }
    }
}

fn error_color(cli_color: Option<ColorWhen>) -> bool {
    match cli_color {
        Some(ColorWhen::Always) => true,
        Some(ColorWhen::Never) => false,
        _ => std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal(),
    }
}
