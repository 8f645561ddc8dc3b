//! Scenario: Misconfigured Catalog
//!
//! Journey: a maintainer edits the list table and drops a line. The run
//! must refuse to start rather than pair filters with the wrong lists.

use std::path::Path;

use listsync::config::parse_with_warnings;
use listsync::ListSyncError;

use crate::common::*;

#[test]
fn scenario_mismatched_tables_refused_before_any_source_call() {
    let (config, warnings) =
        parse_with_warnings(&mismatched_catalog_toml(), Path::new("listsync.toml")).unwrap();
    assert!(warnings.is_empty());

    let err = config.segment_catalog().unwrap_err();
    assert!(matches!(err, ListSyncError::ConfigInconsistency(_)));
    assert!(err
        .to_string()
        .contains("16 segment filters but 15 mailing lists"));
}

#[test]
fn scenario_mismatched_tables_cli_exits_without_network() {
    let env = TestEnv::new();
    env.write("listsync.toml", &mismatched_catalog_toml());
    env.write("directory.csv", ROSTER_CSV);

    let result = env.run(&["-u"]);

    assert_eq!(result.exit_code, 1);
    assert!(
        result
            .stderr
            .contains("16 segment filters but 15 mailing lists"),
        "stderr:\n{}",
        result.stderr
    );
    assert!(result.stdout.is_empty());
}

#[test]
fn scenario_typo_in_config_key_is_flagged() {
    let env = TestEnv::new();
    env.write("listsync.toml", "[catalog]\ndomian = \"example.org\"\n");

    // No token cache, so the run stops at credentials after the warning
    let result = env.run(&["-r"]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("did you mean 'domain'?"),
        "stderr:\n{}",
        result.stderr
    );
}
