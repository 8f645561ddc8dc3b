//! Membership set entity
//!
//! The members of one segment as seen by one source (roster or remote list).

use std::collections::btree_set::{self, BTreeSet};

use crate::domain::value_objects::EmailAddress;

/// An immutable, ordered set of normalized email addresses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipSet {
    members: BTreeSet<EmailAddress>,
}

impl MembershipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, email: &EmailAddress) -> bool {
        self.members.contains(email)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, EmailAddress> {
        self.members.iter()
    }

    /// Members of `self` that are not in `other`
    pub fn difference(&self, other: &MembershipSet) -> MembershipSet {
        self.members.difference(&other.members).cloned().collect()
    }

    /// Members of either set
    pub fn union(&self, other: &MembershipSet) -> MembershipSet {
        self.members.union(&other.members).cloned().collect()
    }

    /// Members of both sets
    pub fn intersection(&self, other: &MembershipSet) -> MembershipSet {
        self.members.intersection(&other.members).cloned().collect()
    }
}

impl FromIterator<EmailAddress> for MembershipSet {
    fn from_iter<I: IntoIterator<Item = EmailAddress>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MembershipSet {
    type Item = EmailAddress;
    type IntoIter = btree_set::IntoIter<EmailAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a> IntoIterator for &'a MembershipSet {
    type Item = &'a EmailAddress;
    type IntoIter = btree_set::Iter<'a, EmailAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
