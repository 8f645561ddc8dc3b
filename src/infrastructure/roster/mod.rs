//! Roster adapters

mod csv_roster;

pub use csv_roster::{parse_roster, CsvRoster, RosterEntry};
