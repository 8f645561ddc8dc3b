//! CSV roster adapter
//!
//! Reads the exported spreadsheet on every `list` call. The whole file is
//! validated before any filter is applied, so one bad record fails every
//! segment rather than silently shrinking some of them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::RosterColumns;
use crate::domain::entities::{MembershipSet, SegmentFilter};
use crate::domain::ports::{RosterDirectory, RosterError};
use crate::domain::value_objects::{EmailAddress, Grade};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// One address from one roster record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub grade: Grade,
    pub is_band: bool,
    pub is_student: bool,
    pub email: EmailAddress,
    /// 1-based line number of the record (header = 1)
    pub line: u64,
}

/// Roster backed by a CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvRoster {
    path: PathBuf,
    columns: RosterColumns,
}

impl CsvRoster {
    pub fn new(path: impl Into<PathBuf>, columns: RosterColumns) -> Self {
        Self {
            path: path.into(),
            columns,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Vec<RosterEntry>, RosterError> {
        let data = fs::read(&self.path).map_err(|e| {
            RosterError::Unreadable(format!("{}: {}", self.path.display(), e))
        })?;
        parse_roster(&data, &self.columns)
    }
}

impl RosterDirectory for CsvRoster {
    fn list(&self, filter: &SegmentFilter) -> Result<MembershipSet, RosterError> {
        let entries = self.read_entries()?;
        let members: MembershipSet = entries
            .into_iter()
            .filter(|e| filter.matches(e.grade, e.is_band, e.is_student))
            .map(|e| e.email)
            .collect();

        tracing::debug!(
            roster = %self.path.display(),
            segment = %filter,
            members = members.len(),
            "read roster segment"
        );
        Ok(members)
    }
}

struct ColumnIndex {
    grade: usize,
    ensemble: usize,
    member_type: usize,
    email: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, columns: &RosterColumns) -> Result<Self, RosterError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
                .ok_or_else(|| RosterError::DirectoryCorrupt {
                    line: 1,
                    reason: format!("missing column '{}'", name),
                })
        };

        Ok(Self {
            grade: find(&columns.grade)?,
            ensemble: find(&columns.ensemble)?,
            member_type: find(&columns.member_type)?,
            email: find(&columns.email)?,
        })
    }
}

/// Parse a roster export.
///
/// Blank records and records with an empty email cell are skipped. A cell
/// may hold several addresses separated by `;`.
pub fn parse_roster(data: &[u8], columns: &RosterColumns) -> Result<Vec<RosterEntry>, RosterError> {
    let data = strip_utf8_bom(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| RosterError::Unreadable(format!("failed to read header row: {}", e)))?
        .clone();
    let index = ColumnIndex::resolve(&headers, columns)?;

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            RosterError::DirectoryCorrupt {
                line,
                reason: e.to_string(),
            }
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let cell = |i: usize| record.get(i).unwrap_or("").trim();
        let corrupt = |reason: String| RosterError::DirectoryCorrupt { line, reason };

        let emails = cell(index.email);
        if emails.is_empty() {
            continue;
        }

        let grade: Grade = cell(index.grade).parse().map_err(corrupt)?;
        let is_band = parse_ensemble(cell(index.ensemble)).map_err(corrupt)?;
        let is_student = parse_member_type(cell(index.member_type)).map_err(corrupt)?;

        for raw in emails.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let email = EmailAddress::parse(raw).map_err(|e| corrupt(e.to_string()))?;
            entries.push(RosterEntry {
                grade,
                is_band,
                is_student,
                email,
                line,
            });
        }
    }

    Ok(entries)
}

fn strip_utf8_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

/// `true` for band, `false` for color guard
fn parse_ensemble(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "band" | "b" | "yes" | "y" | "true" | "1" => Ok(true),
        "guard" | "color guard" | "colorguard" | "v" | "visual" | "no" | "n" | "false" | "0" => {
            Ok(false)
        }
        _ => Err(format!("unrecognized ensemble '{}'", raw)),
    }
}

/// `true` for student, `false` for parent
fn parse_member_type(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "student" | "s" => Ok(true),
        "parent" | "p" | "guardian" => Ok(false),
        _ => Err(format!("unrecognized member type '{}'", raw)),
    }
}
