//! Use Case Factory
//!
//! Creates the run controller with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::time::Duration;

use crate::application::{action_for, ModeAction, RunController, RunOptions};
use crate::config::Config;
use crate::domain::entities::SegmentCatalog;
use crate::domain::ports::EmailValidator;
use crate::domain::value_objects::RunMode;
use crate::error::{ListSyncError, ListSyncResult};
use crate::infrastructure::{CsvRoster, GoogleGroups, MxValidator, TokenSource};

/// Type alias for the concrete RunController with all dependencies
pub type ConcreteRunController = RunController<'static, GoogleGroups, CsvRoster>;

/// Segment catalog from config, narrowed to `only` when given.
///
/// Fails before any source is contacted.
pub fn create_catalog(config: &Config, only: &[String]) -> ListSyncResult<SegmentCatalog> {
    config.segment_catalog()?.retain_lists(only)
}

pub fn create_roster(config: &Config) -> CsvRoster {
    CsvRoster::new(&config.roster.path, config.roster.columns.clone())
}

/// Authenticated Directory API client. Acquires (and if needed refreshes)
/// the access token up front.
pub fn create_remote(config: &Config) -> ListSyncResult<GoogleGroups> {
    let http = GoogleGroups::http_client(&config.remote)
        .map_err(|e| ListSyncError::Setup(format!("HTTP client: {}", e)))?;
    let token = TokenSource::new(&config.remote.token_path, http.clone()).access_token()?;
    Ok(GoogleGroups::new(http, &config.remote, token))
}

/// Mode action; the MX resolver is only started for validate runs.
pub fn create_action(config: &Config, mode: RunMode) -> ListSyncResult<Box<dyn ModeAction>> {
    let timeout = Duration::from_secs(config.validator.timeout_secs);
    action_for(mode, || {
        let validator = MxValidator::system(timeout)
            .map_err(|e| ListSyncError::Setup(format!("DNS resolver: {}", e.0)))?;
        let validator: Box<dyn EmailValidator> = Box::new(validator);
        Ok(validator)
    })
}

/// Create a run controller with all dependencies wired up
pub fn create_run_controller(
    config: &Config,
    mode: RunMode,
    options: RunOptions,
) -> ListSyncResult<ConcreteRunController> {
    let action = create_action(config, mode)?;
    let remote = create_remote(config)?;
    let roster = create_roster(config);
    Ok(RunController::new(remote, roster, action, options))
}
