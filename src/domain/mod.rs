//! Domain Layer
//!
//! The reconciliation core: pure business logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Segments, membership sets, reconciliation results, import batches
//! - `value_objects/` - Immutable value types (EmailAddress, Grade, RunMode)
//! - `services/` - Domain services (ReconciliationEngine)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the network or roster files directly
//! 2. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
