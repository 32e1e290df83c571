//! Structured logging with decode context.
//!
//! Provides logging macros and utilities that include the document source
//! and check name in every log message for easy correlation.

pub mod structured;

pub use structured::*;
