//! Common test utilities for listsync scenario and CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated working and home directories plus a CLI runner
//! - Fixtures: roster exports and config files
//! - `FakeRemote` and `AcceptAllValidator` stand-ins for the remote ports

#![allow(dead_code)]

pub mod env;
pub mod fixtures;
pub mod remote;

pub use env::*;
pub use fixtures::*;
pub use remote::*;
