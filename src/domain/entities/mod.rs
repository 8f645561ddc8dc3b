//! Domain Entities
//!
//! - `Segment` / `SegmentCatalog` - cohort filters bound to mailing lists
//! - `MembershipSet` - one source's view of a segment
//! - `ReconciliationResult` - the two one-way differences
//! - `ImportBatch` - generated bulk-upload rows

mod import_batch;
mod membership;
mod reconciliation;
mod segment;

pub use import_batch::{ImportBatch, ImportRow, IMPORT_HEADER};
pub use membership::MembershipSet;
pub use reconciliation::ReconciliationResult;
pub use segment::{Segment, SegmentCatalog, SegmentFilter};
