//! listsync - mailing-list segment reconciliation
//!
//! listsync compares an authoritative roster (a CSV export of the band
//! directory) against the hosted Google Groups mailing lists, one segment at a
//! time, and reports, exports, validates, adds or clears members.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{RunController, RunEvent, RunEventSink, RunOptions, RunSummary};
pub use config::Config;
pub use domain::entities::{
    ImportBatch, MembershipSet, ReconciliationResult, Segment, SegmentCatalog, SegmentFilter,
};
pub use domain::value_objects::{EmailAddress, Grade, RunMode};
pub use error::{ListSyncError, ListSyncResult, SourceError};
pub use infrastructure::roster::parse_roster;
