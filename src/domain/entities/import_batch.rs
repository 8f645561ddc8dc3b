//! Import batch entity
//!
//! Rows for the Google Groups bulk member upload, accumulated across every
//! segment of a Generate run and written out once.

use std::io::Write;

use crate::domain::value_objects::EmailAddress;

pub const IMPORT_HEADER: [&str; 4] = [
    "Group Email [Required]",
    "Member Email",
    "Member Type",
    "Member Role",
];

const MEMBER_TYPE: &str = "USER";
const MEMBER_ROLE: &str = "MEMBER";

/// One `<list>,<email>,USER,MEMBER` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub list: EmailAddress,
    pub email: EmailAddress,
}

impl ImportRow {
    pub fn new(list: EmailAddress, email: EmailAddress) -> Self {
        Self { list, email }
    }

    fn record(&self) -> [&str; 4] {
        [self.list.as_str(), self.email.as_str(), MEMBER_TYPE, MEMBER_ROLE]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBatch {
    rows: Vec<ImportRow>,
}

impl ImportBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, rows: impl IntoIterator<Item = ImportRow>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[ImportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the header and every row as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(IMPORT_HEADER)?;
        for row in &self.rows {
            out.write_record(row.record())?;
        }
        out.flush()?;
        Ok(())
    }
}
