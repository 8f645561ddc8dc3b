//! Import File Output
//!
//! Writes a generated import batch to a file or to stdout.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use crate::domain::entities::ImportBatch;
use crate::error::ListSyncResult;

/// Where the import CSV goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportDestination<'a> {
    Stdout,
    File(&'a Path),
}

impl<'a> ImportDestination<'a> {
    pub fn from_option(path: Option<&'a Path>) -> Self {
        match path {
            Some(path) => ImportDestination::File(path),
            None => ImportDestination::Stdout,
        }
    }
}

pub fn write_import_batch(
    batch: &ImportBatch,
    destination: ImportDestination<'_>,
) -> ListSyncResult<()> {
    match destination {
        ImportDestination::Stdout => batch.write_csv(io::stdout().lock())?,
        ImportDestination::File(path) => {
            let file = File::create(path)?;
            batch.write_csv(BufWriter::new(file))?;
            tracing::info!(path = %path.display(), rows = batch.len(), "wrote import file");
        }
    }
    Ok(())
}
