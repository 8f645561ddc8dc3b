//! Property tests for listsync.
//!
//! Properties use randomized membership sets and roster files to protect
//! the reconciliation invariants and guard the parsers against panics.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/set_algebra.rs"]
mod set_algebra;

#[path = "properties/roster_parsing.rs"]
mod roster_parsing;
