//! Projections of a decoded check definition.
//!
//! Derived, read-only views for downstream consumers:
//! - `HealthCheck` for the health-status store, keyed by (node, check id)
//! - `CheckType` for the check-execution engine, keyed by check id

pub mod check_type;
pub mod health;

pub use check_type::*;
pub use health::*;
