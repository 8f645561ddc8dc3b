//! Scenario: Clear and Rebuild
//!
//! Journey: the lists have drifted badly, so the maintainer empties every
//! list and repopulates it from the roster, keeping the band staff on
//! every list through the baseline.

use std::convert::Infallible;

use listsync::application::{action_for, NoopEventSink, RunController};
use listsync::config::RosterColumns;
use listsync::domain::entities::{MembershipSet, SegmentCatalog};
use listsync::domain::ports::EmailValidator;
use listsync::infrastructure::CsvRoster;
use listsync::{EmailAddress, RunMode, RunOptions, RunSummary};
use tempfile::TempDir;

use crate::common::*;

fn run(
    mode: RunMode,
    remote: &FakeRemote,
    roster: &CsvRoster,
    catalog: &SegmentCatalog,
    options: RunOptions,
) -> RunSummary {
    let action = action_for(mode, || {
        let validator: Box<dyn EmailValidator> = Box::new(AcceptAllValidator);
        Ok::<_, Infallible>(validator)
    })
    .unwrap();
    RunController::new(remote, roster, action, options).run(catalog, &NoopEventSink)
}

#[test]
fn scenario_clear_then_update_rebuilds_lists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("directory.csv");
    std::fs::write(&path, ROSTER_CSV).unwrap();
    let roster = CsvRoster::new(&path, RosterColumns::default());
    let catalog = SegmentCatalog::default_for_domain("vhsband.com").unwrap();

    // Lists hold a roster member plus a stale address
    let remote = FakeRemote::for_catalog(&catalog).with_list(
        "junior-v-students@vhsband.com",
        ["kim@example.com", "stale@example.com"],
    );

    // Clear removes everyone, including current roster members
    let summary = run(RunMode::Clear, &remote, &roster, &catalog, RunOptions::new());
    assert!(summary.is_success());
    assert_eq!(summary.removed, 2);
    assert!(remote
        .members("junior-v-students@vhsband.com")
        .unwrap()
        .is_empty());

    // Rebuild with the director on every list
    let director = EmailAddress::parse("director@vhsband.com").unwrap();
    let baseline: MembershipSet = [director.clone()].into_iter().collect();
    let summary = run(
        RunMode::Update,
        &remote,
        &roster,
        &catalog,
        RunOptions::new().with_baseline(baseline),
    );

    assert!(summary.is_success());
    assert_eq!(summary.added, 5 + 16);
    for segment in catalog.iter() {
        let members = remote.members(segment.list().as_str()).unwrap();
        assert!(members.contains(&director), "{} lacks the director", segment.list());
    }
    let juniors = remote.members("junior-v-students@vhsband.com").unwrap();
    assert_eq!(juniors.len(), 3);
    assert!(!juniors.contains(&EmailAddress::parse("stale@example.com").unwrap()));
}
