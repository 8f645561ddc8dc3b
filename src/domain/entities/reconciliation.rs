//! Reconciliation result
//!
//! The two one-way differences between a segment's roster set and its
//! remote list.

use super::MembershipSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationResult {
    /// In the roster but not on the remote list
    pub missing_from_remote: MembershipSet,
    /// On the remote list but not in the roster
    pub missing_from_directory: MembershipSet,
    /// Size of the remote set before differencing
    pub remote_count: usize,
    /// Size of the roster set before differencing
    pub directory_count: usize,
}

impl ReconciliationResult {
    pub fn compute(directory: &MembershipSet, remote: &MembershipSet) -> Self {
        Self {
            missing_from_remote: directory.difference(remote),
            missing_from_directory: remote.difference(directory),
            remote_count: remote.len(),
            directory_count: directory.len(),
        }
    }
}
