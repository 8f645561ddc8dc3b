//! Run result types

use crate::domain::entities::ImportBatch;
use crate::domain::ports::RemoteError;
use crate::domain::value_objects::{EmailAddress, RunMode};
use crate::error::SourceError;

use super::action::ActionOutcome;

/// A segment that failed, with the rendered error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSegment {
    pub list: EmailAddress,
    pub error: String,
}

/// Result of a whole run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub mode: RunMode,
    /// Segments whose action completed
    pub reconciled: usize,
    pub failed: Vec<FailedSegment>,
    /// Segments not processed because the run was interrupted
    pub skipped: usize,
    pub interrupted: bool,
    /// Totals across reconciled segments
    pub missing_from_remote: usize,
    pub missing_from_directory: usize,
    pub added: usize,
    pub add_failures: usize,
    pub removed: usize,
    pub flagged: usize,
    /// Generate mode rows, in catalog order
    pub batch: ImportBatch,
}

impl RunSummary {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            reconciled: 0,
            failed: Vec::new(),
            skipped: 0,
            interrupted: false,
            missing_from_remote: 0,
            missing_from_directory: 0,
            added: 0,
            add_failures: 0,
            removed: 0,
            flagged: 0,
            batch: ImportBatch::new(),
        }
    }

    /// Fold one segment's outcome into the totals
    pub fn record(
        &mut self,
        missing_from_remote: usize,
        missing_from_directory: usize,
        outcome: &ActionOutcome,
    ) {
        self.reconciled += 1;
        self.missing_from_remote += missing_from_remote;
        self.missing_from_directory += missing_from_directory;

        match outcome {
            ActionOutcome::Queued(rows) => self.batch.extend(rows.iter().cloned()),
            ActionOutcome::Added(report) => {
                self.added += report.added().count();
                self.add_failures += report.failures().count();
            }
            ActionOutcome::Cleared { removed } => self.removed += removed,
            ActionOutcome::Validated { findings, .. } => self.flagged += findings.len(),
            ActionOutcome::AllPresent | ActionOutcome::Listed(_) => {}
        }
    }

    /// Record a failed segment. Members removed before a clear failed
    /// still count towards `removed`.
    pub fn record_failure(&mut self, list: EmailAddress, error: &SourceError) {
        if let SourceError::Remote(RemoteError::PartialClear { removed, .. }) = error {
            self.removed += removed;
        }
        self.failed.push(FailedSegment {
            list,
            error: error.to_string(),
        });
    }

    /// Whether every segment was reconciled without a failure
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.add_failures == 0 && !self.interrupted
    }

    pub fn total_segments(&self) -> usize {
        self.reconciled + self.failed.len() + self.skipped
    }
}
