//! Test doubles for the remote group service and the MX validator.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use listsync::domain::entities::{MembershipSet, SegmentCatalog};
use listsync::domain::ports::{
    AddReport, AddStatus, EmailValidator, RemoteError, RemoteGroup, ValidatorError, Verdict,
};
use listsync::EmailAddress;

fn email(raw: &str) -> EmailAddress {
    EmailAddress::parse(raw).unwrap()
}

/// Mailing lists kept in memory, counting every mutating call
#[derive(Debug, Default)]
pub struct FakeRemote {
    lists: RefCell<BTreeMap<EmailAddress, BTreeSet<EmailAddress>>>,
    unavailable: HashSet<EmailAddress>,
    mutations: Cell<usize>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every list of `catalog` present and empty
    pub fn for_catalog(catalog: &SegmentCatalog) -> Self {
        catalog.iter().fold(Self::new(), |remote, segment| {
            remote.with_list(segment.list().as_str(), [])
        })
    }

    pub fn with_list<'a>(self, list: &str, members: impl IntoIterator<Item = &'a str>) -> Self {
        let members = members.into_iter().map(email).collect();
        self.lists.borrow_mut().insert(email(list), members);
        self
    }

    /// Every call touching `list` fails with `Unavailable`
    pub fn with_unavailable(mut self, list: &str) -> Self {
        self.unavailable.insert(email(list));
        self
    }

    pub fn members(&self, list: &str) -> Option<MembershipSet> {
        self.lists
            .borrow()
            .get(&email(list))
            .map(|m| m.iter().cloned().collect())
    }

    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }

    fn check(&self, list: &EmailAddress) -> Result<(), RemoteError> {
        if self.unavailable.contains(list) {
            return Err(RemoteError::Unavailable(format!("{} is unreachable", list)));
        }
        if !self.lists.borrow().contains_key(list) {
            return Err(RemoteError::ListNotFound(list.to_string()));
        }
        Ok(())
    }
}

impl RemoteGroup for FakeRemote {
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
            let status = if members.insert(email.clone()) {
                AddStatus::Added
            } else {
                AddStatus::AlreadyMember
            };
            report.record(email.clone(), status);
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

/// Every domain has MX records
#[derive(Debug, Default)]
pub struct AcceptAllValidator;

impl EmailValidator for AcceptAllValidator {
    fn check(&self, _email: &EmailAddress) -> Result<Verdict, ValidatorError> {
        Ok(Verdict::Deliverable)
    }
}
