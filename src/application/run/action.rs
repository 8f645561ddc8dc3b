//! Mode actions
//!
//! One strategy per run mode. The controller picks exactly one before the
//! first segment and hands it every segment's reconciliation result.

use tracing::{debug, info, warn};

use crate::domain::entities::{ImportRow, MembershipSet, ReconciliationResult, Segment};
use crate::domain::ports::{AddReport, EmailValidator, RemoteError, RemoteGroup, Verdict};
use crate::domain::value_objects::{EmailAddress, RunMode};
use crate::error::SourceError;

/// Why an address was flagged in Validate mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationProblem {
    /// The domain has no usable mail exchanger
    Undeliverable(String),
    /// The lookup itself failed, so the address could not be checked
    Unverified(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFinding {
    pub email: EmailAddress,
    pub problem: ValidationProblem,
}

/// What an action did with one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing missing from the remote list
    AllPresent,
    /// Report: roster members missing from the remote list
    Listed(MembershipSet),
    /// Generate: import rows for this segment
    Queued(Vec<ImportRow>),
    /// Validate: flagged addresses only (may be empty)
    Validated {
        checked: usize,
        findings: Vec<ValidationFinding>,
    },
    /// Update: per-address result of the additions
    Added(AddReport),
    /// Clear: number of members removed
    Cleared { removed: usize },
}

pub trait ModeAction {
    fn mode(&self) -> RunMode;

    fn apply(
        &self,
        segment: &Segment,
        result: &ReconciliationResult,
        remote: &dyn RemoteGroup,
    ) -> Result<ActionOutcome, SourceError>;
}

/// Build the action for `mode`. The validator is only constructed for
/// Validate runs.
pub fn action_for<'a, F, E>(mode: RunMode, make_validator: F) -> Result<Box<dyn ModeAction + 'a>, E>
where
    F: FnOnce() -> Result<Box<dyn EmailValidator + 'a>, E>,
{
    let action: Box<dyn ModeAction + 'a> = match mode {
        RunMode::Report => Box::new(ReportAction),
        RunMode::Generate => Box::new(GenerateAction),
        RunMode::Validate => Box::new(ValidateAction::new(make_validator()?)),
        RunMode::Update => Box::new(UpdateAction),
        RunMode::Clear => Box::new(ClearAction),
    };
    Ok(action)
}

pub struct ReportAction;

impl ModeAction for ReportAction {
    fn mode(&self) -> RunMode {
        RunMode::Report
    }

    fn apply(
        &self,
        _segment: &Segment,
        result: &ReconciliationResult,
        _remote: &dyn RemoteGroup,
    ) -> Result<ActionOutcome, SourceError> {
        if result.missing_from_remote.is_empty() {
            return Ok(ActionOutcome::AllPresent);
        }
        Ok(ActionOutcome::Listed(result.missing_from_remote.clone()))
    }
}

pub struct GenerateAction;

impl ModeAction for GenerateAction {
    fn mode(&self) -> RunMode {
        RunMode::Generate
    }

    fn apply(
        &self,
        segment: &Segment,
        result: &ReconciliationResult,
        _remote: &dyn RemoteGroup,
    ) -> Result<ActionOutcome, SourceError> {
        if result.missing_from_remote.is_empty() {
            return Ok(ActionOutcome::AllPresent);
        }
        let rows = result
            .missing_from_remote
            .iter()
            .map(|email| ImportRow::new(segment.list().clone(), email.clone()))
            .collect();
        Ok(ActionOutcome::Queued(rows))
    }
}

pub struct ValidateAction<'a> {
    validator: Box<dyn EmailValidator + 'a>,
}

impl<'a> ValidateAction<'a> {
    pub fn new(validator: Box<dyn EmailValidator + 'a>) -> Self {
        Self { validator }
    }
}

impl ModeAction for ValidateAction<'_> {
    fn mode(&self) -> RunMode {
        RunMode::Validate
    }

    fn apply(
        &self,
        _segment: &Segment,
        result: &ReconciliationResult,
        _remote: &dyn RemoteGroup,
    ) -> Result<ActionOutcome, SourceError> {
        if result.missing_from_remote.is_empty() {
            return Ok(ActionOutcome::AllPresent);
        }

        let mut findings = Vec::new();
        for email in &result.missing_from_remote {
            let problem = match self.validator.check(email) {
                Ok(Verdict::Deliverable) => continue,
                Ok(Verdict::Undeliverable(reason)) => ValidationProblem::Undeliverable(reason),
                Err(e) => {
                    debug!(%email, error = %e, "mail domain lookup failed");
                    ValidationProblem::Unverified(e.to_string())
                }
            };
            findings.push(ValidationFinding {
                email: email.clone(),
                problem,
            });
        }

        Ok(ActionOutcome::Validated {
            checked: result.missing_from_remote.len(),
            findings,
        })
    }
}

pub struct UpdateAction;

impl ModeAction for UpdateAction {
    fn mode(&self) -> RunMode {
        RunMode::Update
    }

    fn apply(
        &self,
        segment: &Segment,
        result: &ReconciliationResult,
        remote: &dyn RemoteGroup,
    ) -> Result<ActionOutcome, SourceError> {
        if result.missing_from_remote.is_empty() {
            return Ok(ActionOutcome::AllPresent);
        }

        info!(
            list = %segment.list(),
            count = result.missing_from_remote.len(),
            "adding missing roster members to mailing list"
        );
        match remote.add_members(segment.list(), &result.missing_from_remote) {
            Ok(report) => Ok(ActionOutcome::Added(report)),
            Err(RemoteError::PartialFailure(report)) => {
                warn!(
                    list = %segment.list(),
                    failed = report.failures().count(),
                    "some additions failed"
                );
                Ok(ActionOutcome::Added(report))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Clears the list whether or not anything is missing from it.
pub struct ClearAction;

impl ModeAction for ClearAction {
    fn mode(&self) -> RunMode {
        RunMode::Clear
    }

    fn apply(
        &self,
        segment: &Segment,
        _result: &ReconciliationResult,
        remote: &dyn RemoteGroup,
    ) -> Result<ActionOutcome, SourceError> {
        info!(list = %segment.list(), "clearing mailing list");
        let removed = remote.clear_members(segment.list())?;
        Ok(ActionOutcome::Cleared { removed })
    }
}
