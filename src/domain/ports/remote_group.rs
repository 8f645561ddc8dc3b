//! Remote Group Port
//!
//! Abstracts the hosted mailing-list service. The engine only lists
//! members; the Update and Clear actions use the mutating methods.

use crate::domain::entities::MembershipSet;
use crate::domain::value_objects::EmailAddress;

/// Outcome of adding one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddStatus {
    Added,
    /// The address was already on the list; nothing changed
    AlreadyMember,
    Failed(String),
}

/// Per-address report of an `add_members` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    pub entries: Vec<(EmailAddress, AddStatus)>,
}

impl AddReport {
    pub fn record(&mut self, email: EmailAddress, status: AddStatus) {
        self.entries.push((email, status));
    }

    pub fn added(&self) -> impl Iterator<Item = &EmailAddress> {
        self.with_status(|s| matches!(s, AddStatus::Added))
    }

    pub fn already_members(&self) -> impl Iterator<Item = &EmailAddress> {
        self.with_status(|s| matches!(s, AddStatus::AlreadyMember))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&EmailAddress, &str)> {
        self.entries.iter().filter_map(|(email, status)| match status {
            AddStatus::Failed(reason) => Some((email, reason.as_str())),
            _ => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    fn with_status(
        &self,
        pred: impl Fn(&AddStatus) -> bool,
    ) -> impl Iterator<Item = &EmailAddress> {
        self.entries
            .iter()
            .filter(move |(_, status)| pred(status))
            .map(|(email, _)| email)
    }
}

/// Errors from the remote group service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Network, authorization or server failure
    Unavailable(String),
    /// The list does not exist on the remote service
    ListNotFound(String),
    /// Some additions succeeded and some did not
    PartialFailure(AddReport),
    /// Clearing stopped part-way; `removed` members were already gone
    PartialClear { removed: usize, reason: String },
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "service unavailable: {}", msg),
            Self::ListNotFound(list) => write!(f, "mailing list not found: {}", list),
            Self::PartialFailure(report) => write!(
                f,
                "{} of {} additions failed",
                report.failures().count(),
                report.entries.len()
            ),
            Self::PartialClear { removed, reason } => write!(
                f,
                "clear stopped after removing {} member(s): {}",
                removed, reason
            ),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Hosted mailing lists
pub trait RemoteGroup {
    /// Current members of one list
    fn list(&self, list: &EmailAddress) -> Result<MembershipSet, RemoteError>;

    /// Add each address as a plain member.
    ///
    /// Adding an existing member is reported as `AlreadyMember`, not as an
    /// error. Implementations return `PartialFailure` when any address failed.
    fn add_members(
        &self,
        list: &EmailAddress,
        emails: &MembershipSet,
    ) -> Result<AddReport, RemoteError>;

    /// Remove every member. Returns how many were removed.
    ///
    /// A failure after at least one removal is `PartialClear`.
    fn clear_members(&self, list: &EmailAddress) -> Result<usize, RemoteError>;
}

impl<T: RemoteGroup + ?Sized> RemoteGroup for &T {
    fn list(&self, list: &EmailAddress) -> Result<MembershipSet, RemoteError> {
        (**self).list(list)
    }

    fn add_members(
        &self,
        list: &EmailAddress,
        emails: &MembershipSet,
    ) -> Result<AddReport, RemoteError> {
        (**self).add_members(list, emails)
    }

    fn clear_members(&self, list: &EmailAddress) -> Result<usize, RemoteError> {
        (**self).clear_members(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(s: &str) -> EmailAddress {
        EmailAddress::parse(s).unwrap()
    }

    #[test]
    fn add_report_partitions_by_status() {
        let mut report = AddReport::default();
        report.record(email("a@x.com"), AddStatus::Added);
        report.record(email("b@x.com"), AddStatus::AlreadyMember);
        report.record(email("c@x.com"), AddStatus::Failed("quota".into()));

        assert_eq!(report.added().count(), 1);
        assert_eq!(report.already_members().count(), 1);
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures, [(&email("c@x.com"), "quota")]);
        assert!(report.has_failures());
    }

    #[test]
    fn partial_failure_display_counts() {
        let mut report = AddReport::default();
        report.record(email("a@x.com"), AddStatus::Added);
        report.record(email("c@x.com"), AddStatus::Failed("boom".into()));
        let err = RemoteError::PartialFailure(report);
        assert_eq!(err.to_string(), "1 of 2 additions failed");
    }

    #[test]
    fn partial_clear_display_keeps_count() {
        let err = RemoteError::PartialClear {
            removed: 3,
            reason: "HTTP 403".into(),
        };
        assert_eq!(
            err.to_string(),
            "clear stopped after removing 3 member(s): HTTP 403"
        );
    }
}
