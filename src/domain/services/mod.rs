//! Domain Services
//!
//! Business logic over domain entities. I/O happens only through ports.

mod reconciler;

pub use reconciler::ReconciliationEngine;
