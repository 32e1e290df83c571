//! Check definition decoder.
//!
//! Tolerant decoding of check definitions written in either key dialect,
//! with duration fields given as literals or raw nanosecond counts:
//! - Order-preserving document reading
//! - Field table and key matching
//! - Strict value coercion
//! - Dialect overlay and alias resolution
//! - Duration normalization

pub mod decoder;
pub mod document;
pub mod duration;
pub mod fields;
pub mod overlay;
pub mod value;

pub use decoder::*;
pub use document::RawDocument;
pub use duration::{parse_duration_literal, RawDuration};
