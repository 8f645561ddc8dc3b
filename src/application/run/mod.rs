//! Run Use Case
//!
//! Reconciles every catalog segment and applies the selected mode.
//!
//! This module handles:
//! - Fetching roster and remote sets per segment
//! - Dispatching the difference to one mode action
//! - Reporting per-segment failures without stopping the run
//! - Accumulating generated import rows into one batch

mod action;
mod events;
mod options;
mod result;
mod use_case;

pub use action::{
    action_for, ActionOutcome, ClearAction, GenerateAction, ModeAction, ReportAction,
    UpdateAction, ValidateAction, ValidationFinding, ValidationProblem,
};
pub use events::{NoopEventSink, RunEvent, RunEventSink};
pub use options::RunOptions;
pub use result::{FailedSegment, RunSummary};
pub use use_case::RunController;
