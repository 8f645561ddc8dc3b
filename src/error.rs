//! Error types for listsync
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow` and
//! downcasts for rendering.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{RemoteError, RosterError};
use crate::infrastructure::google::CredentialError;

/// Result type alias for listsync operations
pub type ListSyncResult<T> = Result<T, ListSyncError>;

/// Fatal errors. Every variant aborts the run before (or instead of)
/// segment processing.
#[derive(Error, Debug)]
pub enum ListSyncError {
    /// Zero or several modes were selected
    #[error(
        "Must choose exactly one mode from: report, generate, validate, update, or clear \
         ({selected} selected)"
    )]
    ModeSelection { selected: usize },

    /// Segment table and list-address table disagree, or the catalog is unusable
    #[error("inconsistent segment configuration: {0}")]
    ConfigInconsistency(String),

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// Could not obtain an authenticated handle for the remote service
    #[error("credential failure: {0}")]
    Credential(#[from] CredentialError),

    /// An adapter (HTTP client, DNS resolver) could not be constructed
    #[error("setup failed: {0}")]
    Setup(String),

    /// Clear was selected without `--yes` and no terminal to ask on
    #[error("refusing to clear mailing lists: stdin is not a terminal (pass --yes to confirm)")]
    ConfirmationRequired,

    /// Generated import batch could not be written
    #[error("failed to write import file: {0}")]
    ImportWrite(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single segment. Reported inline; the run continues.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("remote group: {0}")]
    Remote(#[from] RemoteError),

    #[error("roster: {0}")]
    Roster(#[from] RosterError),
}
