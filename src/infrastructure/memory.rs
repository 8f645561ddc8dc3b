//! In-memory adapters
//!
//! Stand-ins for the remote group service, the roster and the MX validator.
//! Compiled only for tests or with the `testing` feature; builders panic on
//! an unparsable address literal.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::domain::entities::{MembershipSet, SegmentFilter};
use crate::domain::ports::{
    AddReport, AddStatus, EmailValidator, RemoteError, RemoteGroup, RosterDirectory, RosterError,
    ValidatorError, Verdict,
};
use crate::domain::value_objects::EmailAddress;

/// Mailing lists held in memory
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    lists: RefCell<BTreeMap<EmailAddress, BTreeSet<EmailAddress>>>,
    unavailable: HashSet<EmailAddress>,
    rejected: HashSet<EmailAddress>,
    calls: Cell<usize>,
    mutations: Cell<usize>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or replace) a list with the given members
    pub fn with_list<'a>(self, list: &str, members: impl IntoIterator<Item = &'a str>) -> Self {
        let members = members.into_iter().map(parse).collect();
        self.lists.borrow_mut().insert(parse(list), members);
        self
    }

    /// Every call touching `list` fails with `Unavailable`
    pub fn with_unavailable(mut self, list: &str) -> Self {
        self.unavailable.insert(parse(list));
        self
    }

    /// Adding `email` to any list fails
    pub fn with_rejected_member(mut self, email: &str) -> Self {
        self.rejected.insert(parse(email));
        self
    }

    pub fn members(&self, list: &str) -> Option<MembershipSet> {
        self.lists
            .borrow()
            .get(&parse(list))
            .map(|m| m.iter().cloned().collect())
    }

    /// Total calls of any kind
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Calls to `add_members` or `clear_members`
    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }

    fn check(&self, list: &EmailAddress) -> Result<(), RemoteError> {
        self.calls.set(self.calls.get() + 1);
        if self.unavailable.contains(list) {
            return Err(RemoteError::Unavailable(format!("{} is unreachable", list)));
        }
        if !self.lists.borrow().contains_key(list) {
            return Err(RemoteError::ListNotFound(list.to_string()));
        }
        Ok(())
    }
}

impl RemoteGroup for InMemoryRemote {
    fn list(&self, list: &EmailAddress) -> Result<MembershipSet, RemoteError> {
        self.check(list)?;
        Ok(self.lists.borrow()[list].iter().cloned().collect())
    }

    fn add_members(
        &self,
        list: &EmailAddress,
        emails: &MembershipSet,
    ) -> Result<AddReport, RemoteError> {
        self.check(list)?;
        self.mutations.set(self.mutations.get() + 1);

        let mut lists = self.lists.borrow_mut();
        let members = lists.entry(list.clone()).or_default();
        let mut report = AddReport::default();
        for email in emails {
            let status = if self.rejected.contains(email) {
                AddStatus::Failed("rejected by remote".to_string())
            } else if members.insert(email.clone()) {
                AddStatus::Added
            } else {
                AddStatus::AlreadyMember
            };
            report.record(email.clone(), status);
        }

        if report.has_failures() {
            return Err(RemoteError::PartialFailure(report));
        }
        Ok(report)
    }

    fn clear_members(&self, list: &EmailAddress) -> Result<usize, RemoteError> {
        self.check(list)?;
        self.mutations.set(self.mutations.get() + 1);

        let mut lists = self.lists.borrow_mut();
        let members = lists.entry(list.clone()).or_default();
        let removed = members.len();
        members.clear();
        Ok(removed)
    }
}

/// Roster keyed directly by segment filter
#[derive(Debug, Default)]
pub struct InMemoryRoster {
    segments: HashMap<SegmentFilter, MembershipSet>,
    corrupt: Option<RosterError>,
    calls: Cell<usize>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_segment<'a>(
        mut self,
        filter: SegmentFilter,
        members: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let set = members.into_iter().map(parse).collect();
        self.segments.insert(filter, set);
        self
    }

    /// Every lookup fails with `err`
    pub fn corrupt(mut self, err: RosterError) -> Self {
        self.corrupt = Some(err);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl RosterDirectory for InMemoryRoster {
    fn list(&self, filter: &SegmentFilter) -> Result<MembershipSet, RosterError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(err) = &self.corrupt {
            return Err(err.clone());
        }
        Ok(self.segments.get(filter).cloned().unwrap_or_default())
    }
}

/// Validator answering from fixed domain tables
#[derive(Debug, Default)]
pub struct StaticValidator {
    undeliverable: HashSet<String>,
    failing: HashSet<String>,
}

impl StaticValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_undeliverable(mut self, domain: &str) -> Self {
        self.undeliverable.insert(domain.to_lowercase());
        self
    }

    /// Lookups for `domain` error out
    pub fn with_failing(mut self, domain: &str) -> Self {
        self.failing.insert(domain.to_lowercase());
        self
    }
}

impl EmailValidator for StaticValidator {
    fn check(&self, email: &EmailAddress) -> Result<Verdict, ValidatorError> {
        let domain = email.domain();
        if self.failing.contains(domain) {
            return Err(ValidatorError(format!("timed out resolving {}", domain)));
        }
        if self.undeliverable.contains(domain) {
            return Ok(Verdict::Undeliverable(format!("no MX records for {}", domain)));
        }
        Ok(Verdict::Deliverable)
    }
}

fn parse(raw: &str) -> EmailAddress {
    match EmailAddress::parse(raw) {
        Ok(email) => email,
        Err(e) => panic!("invalid fixture address: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Grade;

    #[test]
    fn add_members_is_idempotent() {
        let remote = InMemoryRemote::new().with_list("l@x.com", ["a@x.com"]);
        let list = parse("l@x.com");
        let emails: MembershipSet = [parse("a@x.com"), parse("b@x.com")].into_iter().collect();

        let report = remote.add_members(&list, &emails).unwrap();
        assert_eq!(report.added().count(), 1);
        assert_eq!(report.already_members().count(), 1);
        assert_eq!(remote.members("l@x.com").unwrap().len(), 2);
    }

    #[test]
    fn rejected_member_gives_partial_failure() {
        let remote = InMemoryRemote::new()
            .with_list("l@x.com", [])
            .with_rejected_member("bad@x.com");
        let emails: MembershipSet = [parse("ok@x.com"), parse("bad@x.com")].into_iter().collect();

        let err = remote.add_members(&parse("l@x.com"), &emails).unwrap_err();
        let RemoteError::PartialFailure(report) = err else {
            panic!("expected partial failure");
        };
        assert_eq!(report.added().count(), 1);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn unknown_list_not_found() {
        let remote = InMemoryRemote::new();
        assert!(matches!(
            remote.list(&parse("nope@x.com")),
            Err(RemoteError::ListNotFound(_))
        ));
    }

    #[test]
    fn roster_defaults_to_empty_segment() {
        let roster = InMemoryRoster::new();
        let set = roster
            .list(&SegmentFilter::new(Grade::Ten, true, false))
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    #[should_panic(expected = "invalid fixture address")]
    fn unparsable_literal_is_rejected_at_build_time() {
        let _ = InMemoryRemote::new().with_list("no-at-sign", []);
    }
}
