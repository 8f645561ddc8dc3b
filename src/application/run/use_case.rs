//! Run Use Case
//!
//! Drives one reconciliation run over the segment catalog.

use tracing::{error, info};

use crate::domain::entities::SegmentCatalog;
use crate::domain::ports::{RemoteGroup, RosterDirectory};
use crate::domain::services::ReconciliationEngine;

use super::action::ModeAction;
use super::events::{RunEvent, RunEventSink};
use super::options::RunOptions;
use super::result::RunSummary;

/// Run controller - reconciles every segment and applies the selected action
pub struct RunController<'a, R, D>
where
    R: RemoteGroup,
    D: RosterDirectory,
{
    remote: R,
    roster: D,
    action: Box<dyn ModeAction + 'a>,
    options: RunOptions,
}

impl<'a, R, D> RunController<'a, R, D>
where
    R: RemoteGroup,
    D: RosterDirectory,
{
    pub fn new(
        remote: R,
        roster: D,
        action: Box<dyn ModeAction + 'a>,
        options: RunOptions,
    ) -> Self {
        Self {
            remote,
            roster,
            action,
            options,
        }
    }

    /// Process segments in catalog order.
    ///
    /// A segment whose sources or action fail is reported and skipped; the
    /// loop always moves on to the next segment.
    pub fn run(&self, catalog: &SegmentCatalog, sink: &dyn RunEventSink) -> RunSummary {
        let mode = self.action.mode();
        let mut summary = RunSummary::new(mode);
        let engine = ReconciliationEngine::new(&self.remote, &self.roster, &self.options.baseline);

        sink.on_event(RunEvent::Started {
            mode,
            segments: catalog.len(),
        });

        for (index, segment) in catalog.iter().enumerate() {
            if self.options.should_stop() {
                let remaining = catalog.len() - index;
                info!(remaining, "run interrupted");
                summary.interrupted = true;
                summary.skipped = remaining;
                sink.on_event(RunEvent::Interrupted { remaining });
                break;
            }

            let applied = engine.reconcile(segment).and_then(|result| {
                let outcome = self.action.apply(segment, &result, &self.remote)?;
                Ok((result, outcome))
            });

            match applied {
                Ok((result, outcome)) => {
                    summary.record(
                        result.missing_from_remote.len(),
                        result.missing_from_directory.len(),
                        &outcome,
                    );
                    sink.on_event(RunEvent::SegmentReconciled {
                        index,
                        segment,
                        result: &result,
                        outcome: &outcome,
                    });
                }
                Err(e) => {
                    error!(list = %segment.list(), error = %e, "segment failed");
                    summary.record_failure(segment.list().clone(), &e);
                    sink.on_event(RunEvent::SegmentFailed {
                        index,
                        segment,
                        error: &e,
                    });
                }
            }
        }

        sink.on_event(RunEvent::Finished { summary: &summary });
        summary
    }
}
