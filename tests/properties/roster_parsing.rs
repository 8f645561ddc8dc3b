//! Property tests for roster and config parsing.

use std::path::Path;

use proptest::prelude::*;

use listsync::config::{parse_with_warnings, RosterColumns};
use listsync::parse_roster;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: roster parsing never panics on arbitrary bytes.
    #[test]
    fn property_roster_parse_never_panics(
        data in proptest::collection::vec(any::<u8>(), 0..512)
    ) {
        let _ = parse_roster(&data, &RosterColumns::default());
    }

    /// PROPERTY: every parsed entry comes from a well-formed record, so the
    /// addresses are lowercase and carry a domain.
    #[test]
    fn property_parsed_addresses_are_normalized(
        rows in proptest::collection::vec(
            (
                "(9|10|11|12)",
                "(Band|Guard)",
                "(Student|Parent)",
                "[A-Za-z]{1,8}@[A-Za-z]{1,8}\\.org",
            ),
            0..16,
        )
    ) {
        let mut csv = String::from("Grade,Ensemble,Type,Email\n");
        for (grade, ensemble, kind, email) in &rows {
            csv.push_str(&format!("{},{},{},{}\n", grade, ensemble, kind, email));
        }

        let entries = parse_roster(csv.as_bytes(), &RosterColumns::default()).unwrap();
        prop_assert_eq!(entries.len(), rows.len());
        for entry in entries {
            prop_assert_eq!(entry.email.as_str(), entry.email.as_str().to_lowercase());
            prop_assert!(!entry.email.domain().is_empty());
        }
    }

    /// PROPERTY: config parsing never panics on arbitrary text.
    #[test]
    fn property_config_parse_never_panics(
        s in "(?s).{0,256}"
    ) {
        let _ = parse_with_warnings(&s, Path::new("listsync.toml"));
    }
}
