//! Run Event Port
//!
//! Observable interface for a reconciliation run. The console renderer,
//! and tests, consume these.

use crate::domain::entities::{ReconciliationResult, Segment};
use crate::domain::value_objects::RunMode;
use crate::error::SourceError;

use super::action::ActionOutcome;
use super::result::RunSummary;

/// Event emitted during a run
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// Mode chosen, about to process `segments` segments
    Started { mode: RunMode, segments: usize },

    /// Segment reconciled and the mode action applied
    SegmentReconciled {
        index: usize,
        segment: &'a Segment,
        result: &'a ReconciliationResult,
        outcome: &'a ActionOutcome,
    },

    /// Segment could not be reconciled or its action failed
    SegmentFailed {
        index: usize,
        segment: &'a Segment,
        error: &'a SourceError,
    },

    /// Interrupted before `remaining` segments were processed
    Interrupted { remaining: usize },

    /// Run completed (possibly interrupted)
    Finished { summary: &'a RunSummary },
}

/// Trait for receiving run events
pub trait RunEventSink {
    fn on_event(&self, event: RunEvent<'_>);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl RunEventSink for NoopEventSink {
    fn on_event(&self, _event: RunEvent<'_>) {}
}
