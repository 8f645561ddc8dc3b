//! Reconciliation Engine
//!
//! Fetches both views of a segment and computes the two-way difference.

use tracing::info;

use crate::domain::entities::{MembershipSet, ReconciliationResult, Segment};
use crate::domain::ports::{RemoteGroup, RosterDirectory};
use crate::error::SourceError;

pub struct ReconciliationEngine<'a> {
    remote: &'a dyn RemoteGroup,
    roster: &'a dyn RosterDirectory,
    baseline: &'a MembershipSet,
}

impl<'a> ReconciliationEngine<'a> {
    /// `baseline` addresses count as roster members of every segment.
    pub fn new(
        remote: &'a dyn RemoteGroup,
        roster: &'a dyn RosterDirectory,
        baseline: &'a MembershipSet,
    ) -> Self {
        Self {
            remote,
            roster,
            baseline,
        }
    }

    pub fn reconcile(&self, segment: &Segment) -> Result<ReconciliationResult, SourceError> {
        let remote = self.remote.list(segment.list())?;
        let mut directory = self.roster.list(segment.filter())?;
        if !self.baseline.is_empty() {
            directory = directory.union(self.baseline);
        }

        info!(
            list = %segment.list(),
            remote = remote.len(),
            directory = directory.len(),
            "fetched membership sets"
        );

        Ok(ReconciliationResult::compute(&directory, &remote))
    }
}
