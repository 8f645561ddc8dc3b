//! Segment and SegmentCatalog entities
//!
//! A segment is one cohort (grade, band or color guard, student or parent)
//! bound to the mailing list that should contain exactly that cohort.
//! The catalog is the ordered set of segments processed in a run.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{EmailAddress, Grade};
use crate::error::ListSyncError;

/// Roster filter criteria for one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentFilter {
    pub grade: Grade,
    #[serde(rename = "band")]
    pub is_band: bool,
    #[serde(rename = "student")]
    pub is_student: bool,
}

impl SegmentFilter {
    pub fn new(grade: Grade, is_band: bool, is_student: bool) -> Self {
        Self {
            grade,
            is_band,
            is_student,
        }
    }

    pub fn matches(&self, grade: Grade, is_band: bool, is_student: bool) -> bool {
        self.grade == grade && self.is_band == is_band && self.is_student == is_student
    }

    /// Default list address for this cohort, e.g. `junior-v-parents@vhsband.com`
    pub fn default_list_name(&self, domain: &str) -> String {
        format!(
            "{}-{}-{}@{}",
            self.grade.class_label(),
            if self.is_band { "b" } else { "v" },
            if self.is_student { "students" } else { "parents" },
            domain
        )
    }
}

impl fmt::Display for SegmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grade {} {} {}",
            self.grade,
            if self.is_band { "band" } else { "color guard" },
            if self.is_student { "students" } else { "parents" }
        )
    }
}

/// A cohort filter paired with its mailing list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    filter: SegmentFilter,
    list: EmailAddress,
}

impl Segment {
    pub fn new(filter: SegmentFilter, list: EmailAddress) -> Self {
        Self { filter, list }
    }

    pub fn filter(&self) -> &SegmentFilter {
        &self.filter
    }

    pub fn list(&self) -> &EmailAddress {
        &self.list
    }
}

/// Ordered, validated set of segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentCatalog {
    segments: Vec<Segment>,
}

impl SegmentCatalog {
    /// Build a catalog from paired records.
    ///
    /// Rejects an empty catalog and any list address used twice.
    pub fn new(segments: Vec<Segment>) -> Result<Self, ListSyncError> {
        if segments.is_empty() {
            return Err(ListSyncError::ConfigInconsistency(
                "no segments configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for segment in &segments {
            if !seen.insert(segment.list.clone()) {
                return Err(ListSyncError::ConfigInconsistency(format!(
                    "mailing list {} is bound to more than one segment",
                    segment.list
                )));
            }
        }

        Ok(Self { segments })
    }

    /// The sixteen standard segments for a list domain, in grade order:
    /// band students, band parents, guard students, guard parents.
    pub fn default_for_domain(domain: &str) -> Result<Self, ListSyncError> {
        let mut segments = Vec::with_capacity(16);
        for grade in Grade::ALL {
            let kinds = [(true, true), (true, false), (false, true), (false, false)];
            for (is_band, is_student) in kinds {
                let filter = SegmentFilter::new(grade, is_band, is_student);
                let list = parse_list(&filter.default_list_name(domain))?;
                segments.push(Segment::new(filter, list));
            }
        }
        Self::new(segments)
    }

    /// Build a catalog from two parallel tables, where filter *i* reconciles
    /// against list *i*. The tables must have the same length.
    pub fn from_parallel(
        filters: Vec<SegmentFilter>,
        lists: Vec<String>,
    ) -> Result<Self, ListSyncError> {
        if filters.len() != lists.len() {
            return Err(ListSyncError::ConfigInconsistency(format!(
                "{} segment filters but {} mailing lists",
                filters.len(),
                lists.len()
            )));
        }

        let segments = filters
            .into_iter()
            .zip(lists)
            .map(|(filter, list)| Ok(Segment::new(filter, parse_list(&list)?)))
            .collect::<Result<Vec<_>, ListSyncError>>()?;
        Self::new(segments)
    }

    /// Keep only the named lists, preserving catalog order.
    pub fn retain_lists(self, lists: &[String]) -> Result<Self, ListSyncError> {
        if lists.is_empty() {
            return Ok(self);
        }

        let wanted = lists
            .iter()
            .map(|l| parse_list(l))
            .collect::<Result<HashSet<_>, _>>()?;

        if let Some(unknown) = wanted
            .iter()
            .find(|w| !self.segments.iter().any(|s| &s.list == *w))
        {
            return Err(ListSyncError::ConfigInconsistency(format!(
                "mailing list {} is not in the segment catalog",
                unknown
            )));
        }

        let segments = self
            .segments
            .into_iter()
            .filter(|s| wanted.contains(&s.list))
            .collect();
        Self::new(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

fn parse_list(raw: &str) -> Result<EmailAddress, ListSyncError> {
    EmailAddress::parse(raw).map_err(|e| {
        ListSyncError::ConfigInconsistency(format!("invalid mailing list address: {}", e))
    })
}
