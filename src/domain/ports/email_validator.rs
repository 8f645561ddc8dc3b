//! Email Validator Port
//!
//! Checks whether an address's domain can receive mail.

use crate::domain::value_objects::EmailAddress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Deliverable,
    Undeliverable(String),
}

impl Verdict {
    pub fn is_deliverable(&self) -> bool {
        matches!(self, Verdict::Deliverable)
    }
}

/// The check itself could not be completed (resolver timeout etc.)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorError(pub String);

impl std::fmt::Display for ValidatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lookup failed: {}", self.0)
    }
}

impl std::error::Error for ValidatorError {}

pub trait EmailValidator {
    fn check(&self, email: &EmailAddress) -> Result<Verdict, ValidatorError>;
}
