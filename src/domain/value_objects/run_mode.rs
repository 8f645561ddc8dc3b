//! Run Mode Value Object
//!
//! The single action applied to every segment in one run.

use std::fmt;

use crate::error::ListSyncError;

/// Run mode
///
/// - `Report`: show differences only
/// - `Generate`: emit an import file for missing members
/// - `Validate`: check the mail domain of missing members
/// - `Update`: add missing members to the remote lists
/// - `Clear`: remove every member from the remote lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunMode {
    Report,
    Generate,
    Validate,
    Update,
    Clear,
}

impl RunMode {
    /// Resolve the five independent CLI switches into one mode.
    ///
    /// Anything other than exactly one selected switch is rejected.
    pub fn from_flags(
        report: bool,
        generate: bool,
        validate: bool,
        update: bool,
        clear: bool,
    ) -> Result<Self, ListSyncError> {
        let candidates = [
            (report, RunMode::Report),
            (generate, RunMode::Generate),
            (validate, RunMode::Validate),
            (update, RunMode::Update),
            (clear, RunMode::Clear),
        ];

        let mut selected = candidates.iter().filter(|(on, _)| *on).map(|(_, m)| *m);
        match (selected.next(), selected.next()) {
            (Some(mode), None) => Ok(mode),
            _ => Err(ListSyncError::ModeSelection {
                selected: candidates.iter().filter(|(on, _)| *on).count(),
            }),
        }
    }

    /// Whether this mode needs an explicit confirmation before running
    pub fn is_destructive(self) -> bool {
        matches!(self, RunMode::Clear)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunMode::Report => "report",
            RunMode::Generate => "generate",
            RunMode::Validate => "validate",
            RunMode::Update => "update",
            RunMode::Clear => "clear",
        };
        f.write_str(name)
    }
}
