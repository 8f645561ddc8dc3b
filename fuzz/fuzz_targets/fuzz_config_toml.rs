#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing and catalog construction should never panic
        if let Ok((config, _warnings)) =
            listsync::config::parse_with_warnings(content, Path::new("listsync.toml"))
        {
            let _ = config.segment_catalog();
            let _ = config.baseline_members();
        }
    }
});
