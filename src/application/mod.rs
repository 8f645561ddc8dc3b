//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `RunController` - Reconciles the segment catalog under one run mode

pub mod run;

pub use run::{
    action_for, ActionOutcome, ModeAction, NoopEventSink, RunController, RunEvent, RunEventSink,
    RunOptions, RunSummary, ValidationFinding, ValidationProblem,
};
