//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod email;
mod grade;
mod run_mode;

pub use config_warning::ConfigWarning;
pub use email::{EmailAddress, EmailError};
pub use grade::Grade;
pub use run_mode::RunMode;
