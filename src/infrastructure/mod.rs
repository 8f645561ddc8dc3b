//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//!
//! ## Structure
//!
//! - `roster/` - CSV roster export
//! - `google/` - Directory API client and OAuth token cache
//! - `dns/` - MX-record email validator
//! - `memory` - in-memory stand-ins for all three ports (tests and the
//!   `testing` feature only)

pub mod dns;
pub mod google;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod roster;

pub use dns::MxValidator;
pub use google::{GoogleGroups, TokenSource};
#[cfg(any(test, feature = "testing"))]
pub use memory::{InMemoryRemote, InMemoryRoster, StaticValidator};
pub use roster::CsvRoster;
