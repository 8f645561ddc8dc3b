//! Roster Directory Port
//!
//! The authoritative roster, queried by segment filter.

use crate::domain::entities::{MembershipSet, SegmentFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// The roster could not be read at all
    Unreadable(String),
    /// A record could not be interpreted
    DirectoryCorrupt { line: u64, reason: String },
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable(msg) => write!(f, "cannot read roster: {}", msg),
            Self::DirectoryCorrupt { line, reason } => {
                write!(f, "corrupt roster record at line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for RosterError {}

pub trait RosterDirectory {
    /// Addresses of every roster entry matching the filter
    fn list(&self, filter: &SegmentFilter) -> Result<MembershipSet, RosterError>;
}

impl<T: RosterDirectory + ?Sized> RosterDirectory for &T {
    fn list(&self, filter: &SegmentFilter) -> Result<MembershipSet, RosterError> {
        (**self).list(filter)
    }
}
