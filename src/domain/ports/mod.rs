//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod email_validator;
pub mod remote_group;
pub mod roster_directory;

pub use email_validator::{EmailValidator, ValidatorError, Verdict};
pub use remote_group::{AddReport, AddStatus, RemoteError, RemoteGroup};
pub use roster_directory::{RosterDirectory, RosterError};
