//! Test fixtures - reusable roster exports and configs.

/// Roster export covering three segments, with a BOM-free header and one
/// record holding two parent addresses.
pub const ROSTER_CSV: &str = "\
Grade,Ensemble,Type,Email
9,Band,Student,ana@example.com
9,Band,Parent,ana.mom@example.com;ana.dad@example.com
11,Guard,Student,kim@example.com
11,Guard,Student,lee@example.com
";

/// Parallel catalog with 16 filters and only 15 lists
pub fn mismatched_catalog_toml() -> String {
    let mut toml = String::new();
    let lists: Vec<String> = (0..15).map(|i| format!("\"l{}@example.org\"", i)).collect();
    toml.push_str(&format!("[catalog]\nlists = [{}]\n\n", lists.join(", ")));
    for grade in [9, 10, 11, 12] {
        for (band, student) in [(true, true), (true, false), (false, true), (false, false)] {
            toml.push_str(&format!(
                "[[catalog.filters]]\ngrade = {}\nband = {}\nstudent = {}\n\n",
                grade, band, student
            ));
        }
    }
    toml
}
