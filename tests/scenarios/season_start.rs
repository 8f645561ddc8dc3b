//! Scenario: Season Start
//!
//! Journey: the roster has been exported for the new season and the
//! mailing lists are still empty.
//!
//! Steps:
//! 1. Report shows every roster address as missing
//! 2. Generate produces one import row per missing address
//! 3. Update adds the missing addresses
//! 4. A second report finds every list in sync
//! 5. A second update adds nothing

use std::cell::RefCell;
use std::convert::Infallible;
use std::path::Path;

use listsync::application::{action_for, ActionOutcome, ModeAction, RunController, RunEvent};
use listsync::config::RosterColumns;
use listsync::domain::entities::{MembershipSet, SegmentCatalog, IMPORT_HEADER};
use listsync::domain::ports::{EmailValidator, RemoteGroup};
use listsync::infrastructure::CsvRoster;
use listsync::{RunEventSink, RunMode, RunOptions, RunSummary};
use tempfile::TempDir;

use crate::common::*;

#[derive(Default)]
struct Outcomes(RefCell<Vec<(String, ActionOutcome)>>);

impl RunEventSink for Outcomes {
    fn on_event(&self, event: RunEvent<'_>) {
        if let RunEvent::SegmentReconciled {
            segment, outcome, ..
        } = event
        {
            self.0
                .borrow_mut()
                .push((segment.list().to_string(), outcome.clone()));
        }
    }
}

fn action(mode: RunMode) -> Box<dyn ModeAction> {
    action_for(mode, || {
        let validator: Box<dyn EmailValidator> = Box::new(AcceptAllValidator);
        Ok::<_, Infallible>(validator)
    })
    .unwrap()
}

fn run(
    mode: RunMode,
    remote: &FakeRemote,
    roster_path: &Path,
    catalog: &SegmentCatalog,
) -> (RunSummary, Vec<(String, ActionOutcome)>) {
    let roster = CsvRoster::new(roster_path, RosterColumns::default());
    let controller = RunController::new(remote, roster, action(mode), RunOptions::new());
    let sink = Outcomes::default();
    let summary = controller.run(catalog, &sink);
    (summary, sink.0.into_inner())
}

fn setup() -> (TempDir, SegmentCatalog, FakeRemote) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("directory.csv"), ROSTER_CSV).unwrap();
    let catalog = SegmentCatalog::default_for_domain("vhsband.com").unwrap();
    let remote = FakeRemote::for_catalog(&catalog);
    (dir, catalog, remote)
}

#[test]
fn scenario_season_start_complete_journey() {
    let (dir, catalog, remote) = setup();
    let roster = dir.path().join("directory.csv");

    // Step 1: everything missing
    let (summary, _) = run(RunMode::Report, &remote, &roster, &catalog);
    assert!(summary.is_success());
    assert_eq!(summary.reconciled, 16);
    assert_eq!(summary.missing_from_remote, 5);
    assert_eq!(summary.missing_from_directory, 0);
    assert_eq!(remote.mutations(), 0, "report must not touch the lists");

    // Step 2: one import row per missing address
    let (summary, _) = run(RunMode::Generate, &remote, &roster, &catalog);
    assert_eq!(summary.batch.len(), 5);
    let mut csv = Vec::new();
    summary.batch.write_csv(&mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert!(csv.starts_with(&IMPORT_HEADER.join(",")));
    assert!(csv.contains("freshmen-b-students@vhsband.com,ana@example.com,USER,MEMBER"));
    assert!(csv.contains("junior-v-students@vhsband.com,kim@example.com,USER,MEMBER"));
    assert_eq!(remote.mutations(), 0, "generate must not touch the lists");

    // Step 3: add them
    let (summary, _) = run(RunMode::Update, &remote, &roster, &catalog);
    assert!(summary.is_success());
    assert_eq!(summary.added, 5);
    let parents = remote.members("freshmen-b-parents@vhsband.com").unwrap();
    assert_eq!(parents.len(), 2);

    // Step 4: in sync
    let (summary, outcomes) = run(RunMode::Report, &remote, &roster, &catalog);
    assert_eq!(summary.missing_from_remote, 0);
    assert!(outcomes
        .iter()
        .all(|(_, outcome)| *outcome == ActionOutcome::AllPresent));

    // Step 5: idempotent
    let (summary, _) = run(RunMode::Update, &remote, &roster, &catalog);
    assert_eq!(summary.added, 0);
}

#[test]
fn scenario_extra_list_members_are_reported_not_removed() {
    let (dir, catalog, _) = setup();
    let roster = dir.path().join("directory.csv");
    let remote = FakeRemote::for_catalog(&catalog).with_list(
        "junior-v-students@vhsband.com",
        ["kim@example.com", "lee@example.com", "graduated@example.com"],
    );

    let (summary, _) = run(RunMode::Update, &remote, &roster, &catalog);

    assert_eq!(summary.missing_from_directory, 1);
    let members = remote.members("junior-v-students@vhsband.com").unwrap();
    assert_eq!(members.len(), 3, "update only ever adds");
}

#[test]
fn scenario_unreachable_list_does_not_stop_the_run() {
    let (dir, catalog, _) = setup();
    let roster = dir.path().join("directory.csv");
    let remote = FakeRemote::for_catalog(&catalog).with_unavailable("freshmen-b-parents@vhsband.com");

    let (summary, outcomes) = run(RunMode::Update, &remote, &roster, &catalog);

    assert!(!summary.is_success());
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].list.as_str(), "freshmen-b-parents@vhsband.com");
    assert_eq!(outcomes.len(), 15);
    assert_eq!(summary.added, 3);
}

#[test]
fn scenario_corrupt_roster_fails_every_segment() {
    let (dir, catalog, remote) = setup();
    let roster = dir.path().join("directory.csv");
    std::fs::write(&roster, "Grade,Ensemble,Type,Email\n8,band,s,a@example.com\n").unwrap();

    let (summary, outcomes) = run(RunMode::Update, &remote, &roster, &catalog);

    assert!(outcomes.is_empty());
    assert_eq!(summary.failed.len(), 16);
    assert_eq!(remote.mutations(), 0);
}

#[test]
fn scenario_report_is_repeatable() {
    let (dir, catalog, remote) = setup();
    let roster = dir.path().join("directory.csv");

    let (first_summary, first) = run(RunMode::Report, &remote, &roster, &catalog);
    let (second_summary, second) = run(RunMode::Report, &remote, &roster, &catalog);

    assert_eq!(first, second);
    assert_eq!(
        first_summary.missing_from_remote,
        second_summary.missing_from_remote
    );
}

#[test]
fn scenario_uploading_generated_file_completes_lists() {
    let (dir, catalog, remote) = setup();
    let roster = dir.path().join("directory.csv");

    let (summary, _) = run(RunMode::Generate, &remote, &roster, &catalog);

    // Stand in for the administrator uploading the import file
    for row in summary.batch.rows() {
        let one: MembershipSet = [row.email.clone()].into_iter().collect();
        remote.add_members(&row.list, &one).unwrap();
    }

    let (summary, _) = run(RunMode::Report, &remote, &roster, &catalog);
    assert_eq!(summary.missing_from_remote, 0);
}
