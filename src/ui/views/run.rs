//! Console rendering of a reconciliation run

use std::fmt::Write as _;

use listsync::application::{
    ActionOutcome, RunEvent, RunEventSink, RunSummary, ValidationProblem,
};
use listsync::domain::entities::{MembershipSet, ReconciliationResult, Segment};
use listsync::domain::value_objects::RunMode;
use listsync::SourceError;

use crate::ui::context::UiContext;
use crate::ui::text::ColoredText;
use crate::ui::theme::{Icons, SEPARATOR};

/// Prints each segment block as soon as it is reconciled.
///
/// Writes to stderr when stdout carries the generated import CSV.
pub struct ConsoleReporter {
    color: bool,
    unicode: bool,
    to_stderr: bool,
}

impl ConsoleReporter {
    pub fn new(ui: &UiContext, to_stderr: bool) -> Self {
        Self {
            color: ui.color,
            unicode: ui.unicode,
            to_stderr,
        }
    }

    fn emit(&self, text: &str) {
        if self.to_stderr {
            eprint!("{}", text);
        } else {
            print!("{}", text);
        }
    }
}

impl RunEventSink for ConsoleReporter {
    fn on_event(&self, event: RunEvent<'_>) {
        match event {
            RunEvent::Started { .. } => {}
            RunEvent::SegmentReconciled {
                segment,
                result,
                outcome,
                ..
            } => self.emit(&render_segment(
                segment,
                result,
                outcome,
                self.color,
                self.unicode,
            )),
            RunEvent::SegmentFailed { segment, error, .. } => {
                self.emit(&render_failure(segment, error, self.color, self.unicode))
            }
            RunEvent::Interrupted { remaining } => eprintln!(
                "{}",
                ColoredText::warning(format!(
                    "Interrupted: {} segment(s) not processed",
                    remaining
                ))
                .render(self.color)
            ),
            RunEvent::Finished { summary } => {
                self.emit(&render_summary(summary, self.color, self.unicode))
            }
        }
    }
}

fn render_header(out: &mut String, segment: &Segment, color: bool) {
    let _ = writeln!(out, "{}", SEPARATOR);
    let _ = writeln!(
        out,
        "{} {}",
        ColoredText::info(segment.list().as_str()).bold().render(color),
        ColoredText::dim(format!("({})", segment.filter())).render(color)
    );
}

fn render_members(out: &mut String, members: &MembershipSet, icons: &Icons) {
    for email in members {
        let _ = writeln!(out, "  {} {}", icons.item, email);
    }
}

pub fn render_segment(
    segment: &Segment,
    result: &ReconciliationResult,
    outcome: &ActionOutcome,
    color: bool,
    unicode: bool,
) -> String {
    let icons = Icons::for_unicode(unicode);
    let mut out = String::new();
    render_header(&mut out, segment, color);

    match outcome {
        ActionOutcome::AllPresent => {
            let _ = writeln!(
                out,
                "{}",
                ColoredText::success("All roster entries are in the mailing list").render(color)
            );
        }
        ActionOutcome::Listed(missing) => {
            let _ = writeln!(
                out,
                "{}",
                ColoredText::warning("In roster but not in mailing list:").render(color)
            );
            render_members(&mut out, missing, &icons);
        }
        ActionOutcome::Queued(rows) => {
            let _ = writeln!(out, "{} missing member(s) queued for import", rows.len());
        }
        ActionOutcome::Validated { checked, findings } => {
            if findings.is_empty() {
                let _ = writeln!(
                    out,
                    "{}",
                    ColoredText::success(format!(
                        "All {} missing address(es) have a valid mail domain",
                        checked
                    ))
                    .render(color)
                );
            }
            for finding in findings {
                let line = match &finding.problem {
                    ValidationProblem::Undeliverable(reason) => ColoredText::warning(format!(
                        "{} {} does not appear to be from a valid email domain ({})",
                        icons.warning, finding.email, reason
                    )),
                    ValidationProblem::Unverified(reason) => ColoredText::dim(format!(
                        "{} {} could not be verified ({})",
                        icons.warning, finding.email, reason
                    )),
                };
                let _ = writeln!(out, "  {}", line.render(color));
            }
        }
        ActionOutcome::Added(report) => {
            let _ = writeln!(
                out,
                "{}",
                ColoredText::success(format!(
                    "Added {} member(s) to the mailing list",
                    report.added().count()
                ))
                .render(color)
            );
            let already = report.already_members().count();
            if already > 0 {
                let _ = writeln!(out, "{} already member(s)", already);
            }
            for (email, reason) in report.failures() {
                let _ = writeln!(
                    out,
                    "  {}",
                    ColoredText::error(format!("{} {}: {}", icons.error, email, reason))
                        .render(color)
                );
            }
        }
        ActionOutcome::Cleared { removed } => {
            let _ = writeln!(
                out,
                "Removed {} member(s) from the mailing list",
                removed
            );
        }
    }

    if result.missing_from_directory.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            ColoredText::dim("All mailing list entries are in the roster").render(color)
        );
    } else {
        let _ = writeln!(
            out,
            "{}",
            ColoredText::warning("In mailing list but not in roster:").render(color)
        );
        render_members(&mut out, &result.missing_from_directory, &icons);
    }

    out
}

pub fn render_failure(
    segment: &Segment,
    error: &SourceError,
    color: bool,
    unicode: bool,
) -> String {
    let icons = Icons::for_unicode(unicode);
    let mut out = String::new();
    render_header(&mut out, segment, color);
    let _ = writeln!(
        out,
        "{}",
        ColoredText::error(format!("{} {}", icons.error, error)).render(color)
    );
    out
}

pub fn render_summary(summary: &RunSummary, color: bool, unicode: bool) -> String {
    let icons = Icons::for_unicode(unicode);
    let mut out = String::new();
    let _ = writeln!(out, "{}", SEPARATOR);

    let headline = format!(
        "{}: {} of {} segment(s) reconciled",
        summary.mode,
        summary.reconciled,
        summary.total_segments()
    );
    let headline = if summary.is_success() {
        ColoredText::success(format!("{} {}", icons.success, headline))
    } else {
        ColoredText::error(format!(
            "{} {}, {} failed",
            icons.error,
            headline,
            summary.failed.len()
        ))
    };
    let _ = writeln!(out, "{}", headline.bold().render(color));

    let _ = writeln!(
        out,
        "  {} missing from mailing lists, {} missing from directory",
        summary.missing_from_remote, summary.missing_from_directory
    );

    match summary.mode {
        RunMode::Report => {}
        RunMode::Generate => {
            let _ = writeln!(out, "  {} import row(s)", summary.batch.len());
        }
        RunMode::Validate => {
            let _ = writeln!(out, "  {} address(es) flagged", summary.flagged);
        }
        RunMode::Update => {
            let _ = writeln!(
                out,
                "  {} added, {} failed",
                summary.added, summary.add_failures
            );
        }
        RunMode::Clear => {
            let _ = writeln!(out, "  {} removed", summary.removed);
        }
    }

    for failed in &summary.failed {
        let _ = writeln!(
            out,
            "  {}",
            ColoredText::error(format!("{} {}: {}", icons.error, failed.list, failed.error))
                .render(color)
        );
    }

    if summary.interrupted {
        let _ = writeln!(
            out,
            "{}",
            ColoredText::warning(format!(
                "{} interrupted, {} segment(s) skipped",
                icons.warning, summary.skipped
            ))
            .render(color)
        );
    }

    out
}
