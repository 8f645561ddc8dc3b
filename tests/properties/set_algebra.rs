//! Property tests for the two one-way membership differences.

use proptest::prelude::*;

use listsync::domain::entities::{MembershipSet, ReconciliationResult};
use listsync::EmailAddress;

fn membership_set() -> impl Strategy<Value = MembershipSet> {
    // A small local-part alphabet so the two sides overlap often
    let address = "[a-e]{1,3}@(example\\.com|vhsband\\.com)"
        .prop_map(|raw| EmailAddress::parse(&raw).unwrap());
    proptest::collection::vec(address, 0..24).prop_map(|v| v.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the two differences never share an address.
    #[test]
    fn property_differences_are_disjoint(
        directory in membership_set(),
        remote in membership_set(),
    ) {
        let result = ReconciliationResult::compute(&directory, &remote);
        prop_assert!(result
            .missing_from_remote
            .intersection(&result.missing_from_directory)
            .is_empty());
    }

    /// PROPERTY: adding what is missing makes the remote a superset of the
    /// roster, and a second reconciliation finds nothing missing.
    #[test]
    fn property_update_converges(
        directory in membership_set(),
        remote in membership_set(),
    ) {
        let first = ReconciliationResult::compute(&directory, &remote);
        let updated = remote.union(&first.missing_from_remote);
        let second = ReconciliationResult::compute(&directory, &updated);

        prop_assert!(second.missing_from_remote.is_empty());
        prop_assert_eq!(second.missing_from_directory, first.missing_from_directory);
    }

    /// PROPERTY: common members plus the missing side rebuild each input.
    #[test]
    fn property_partition_reconstructs_inputs(
        directory in membership_set(),
        remote in membership_set(),
    ) {
        let result = ReconciliationResult::compute(&directory, &remote);
        let common = directory.intersection(&remote);

        prop_assert_eq!(common.union(&result.missing_from_remote), directory.clone());
        prop_assert_eq!(common.union(&result.missing_from_directory), remote.clone());
        prop_assert_eq!(result.directory_count, directory.len());
        prop_assert_eq!(result.remote_count, remote.len());
    }
}
