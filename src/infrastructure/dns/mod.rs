//! DNS-backed email validation

mod mx_validator;

pub use mx_validator::{MxAnswer, MxLookup, MxValidator, SystemResolver};
