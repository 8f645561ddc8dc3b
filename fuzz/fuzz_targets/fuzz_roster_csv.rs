#![no_main]

use libfuzzer_sys::fuzz_target;
use listsync::config::RosterColumns;

fuzz_target!(|data: &[u8]| {
    let _ = listsync::parse_roster(data, &RosterColumns::default());
});
