//! checkdef-core - Tolerant decoding of health/service check definitions
//!
//! This crate decodes check definitions (script, HTTP, TCP, gRPC, TTL, alias,
//! Docker-exec checks) written by operators or generated by deployment tools.
//! The implementation prioritizes:
//!
//! 1. **Tolerance** - Two key dialects and two duration forms are accepted
//! 2. **Strictness** - Anything else is a malformed value, never a guess
//! 3. **Purity** - No I/O, no shared state; failures surface as errors
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `decode` - Overlay parse, dialect resolution, duration normalization
//! - `definition` - Canonical `CheckDefinition` record
//! - `views` - Health-status and check-execution projections
//! - `error` - Error taxonomy
//! - `logging` - Structured logging with decode context
//!
//! ## Example
//!
//! ```
//! use checkdef_core::{decode_str, HEALTH_CRITICAL};
//!
//! let def = decode_str(r#"{"Name": "web", "HTTP": "http://localhost", "interval": "10s"}"#).unwrap();
//! let health = def.health_check("node-1");
//! assert_eq!(health.check_id.as_str(), "web");
//! assert_eq!(health.status, HEALTH_CRITICAL);
//! ```

pub mod decode;
pub mod definition;
pub mod error;
pub mod logging;
pub mod views;

#[cfg(feature = "python")]
mod python;

pub use decode::{decode, decode_all, decode_str, decode_with_context, parse_duration_literal};
pub use definition::*;
pub use error::CheckDefinitionError;
pub use views::{to_check_type, to_health_check, CheckKind, CheckType, HealthCheck};

/// Initialize the process-wide logger.
///
/// Called by the `checkdef` binary and the Python bindings; the library never
/// initializes logging on its own. `RUST_LOG` overrides the default level.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
