use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use dialoguer::Confirm;

use listsync::application::RunOptions;
use listsync::config::{self, Config};
use listsync::presentation::factory;
use listsync::presentation::{write_import_batch, Cli, ImportDestination};
use listsync::{ListSyncError, RunMode};

use crate::ui::context::UiContext;
use crate::ui::error::print_config_warning;
use crate::ui::views::run::ConsoleReporter;

pub const CLEAR_PROMPT: &str =
    "Are you sure you want to clear all mailing lists of members before starting?";

/// Process exit status of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    SegmentsFailed,
    Cancelled,
}

impl RunStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Success | RunStatus::Cancelled => 0,
            RunStatus::SegmentsFailed => 1,
        }
    }
}

pub fn cmd_run(cli: &Cli, mode: RunMode) -> Result<RunStatus> {
    let cwd = std::env::current_dir()?;
    let (config, warnings) = config::load_resolved(cli.config.as_deref(), &cwd)?;
    let config = apply_cli_overrides(config, cli);
    let ui = UiContext::new(cli.color, &config);

    for warning in &warnings {
        print_config_warning(warning, ui.color);
    }

    // Configuration problems are fatal before either source is contacted
    let catalog = factory::create_catalog(&config, &cli.only)?;
    let baseline = config.baseline_members()?;
    tracing::info!(%mode, segments = catalog.len(), "starting run");

    if mode.is_destructive() && !confirm_clear(cli.yes, ui.caps.stdin_tty)? {
        println!("Clear cancelled");
        return Ok(RunStatus::Cancelled);
    }

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    }) {
        tracing::warn!(error = %e, "could not install Ctrl+C handler");
    }

    let options = RunOptions::new()
        .with_baseline(baseline)
        .with_running_flag(running);
    let controller = factory::create_run_controller(&config, mode, options)?;

    let csv_on_stdout = mode == RunMode::Generate && cli.output.is_none();
    let reporter = ConsoleReporter::new(&ui, csv_on_stdout);
    let summary = controller.run(&catalog, &reporter);

    if mode == RunMode::Generate {
        write_import_batch(
            &summary.batch,
            ImportDestination::from_option(cli.output.as_deref()),
        )?;
    }

    Ok(if summary.is_success() {
        RunStatus::Success
    } else {
        RunStatus::SegmentsFailed
    })
}

fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(roster) = &cli.roster {
        config.roster.path = roster.clone();
    }
    if let Some(token) = &cli.token {
        config.remote.token_path = token.clone();
    }
    config
}

fn confirm_clear(yes: bool, stdin_tty: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !stdin_tty {
        return Err(ListSyncError::ConfirmationRequired.into());
    }

    let confirmed = Confirm::new()
        .with_prompt(CLEAR_PROMPT)
        .default(false)
        .interact()?;
    Ok(confirmed)
}
