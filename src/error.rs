//! Error types for check definition decoding.

use thiserror::Error;

/// Error returned when a check definition cannot be decoded.
///
/// Decoding aborts on the first failure; no partial record is ever handed
/// back alongside an error.
///
/// # Example
///
/// ```
/// use checkdef_core::{decode_str, CheckDefinitionError};
///
/// match decode_str(r#"{"Name": "web", "Interval": "soon"}"#) {
///     Err(CheckDefinitionError::MalformedValue { field, .. }) => assert_eq!(field, "Interval"),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Error, Debug)]
pub enum CheckDefinitionError {
    /// A field held a value of the wrong shape.
    ///
    /// Raised for duration fields holding something other than a duration
    /// literal or a number, for unparseable duration literals, and for typed
    /// fields receiving the wrong JSON type.
    #[error("malformed value for {field}: {value} ({reason})")]
    MalformedValue {
        /// Document key the value was read from
        field: String,
        /// Offending raw value, rendered as JSON
        value: String,
        /// Short description of what was expected
        reason: String,
    },

    /// The input text was not valid JSON.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// One element of a definition array failed to decode.
    #[error("check definition at index {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: Box<CheckDefinitionError>,
    },
}

impl CheckDefinitionError {
    pub fn malformed(field: &str, value: &serde_json::Value, reason: impl Into<String>) -> Self {
        CheckDefinitionError::MalformedValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error (or the element error it wraps) is a malformed value.
    pub fn is_malformed_value(&self) -> bool {
        match self {
            CheckDefinitionError::MalformedValue { .. } => true,
            CheckDefinitionError::Entry { source, .. } => source.is_malformed_value(),
            CheckDefinitionError::Json(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckDefinitionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_malformed_display() {
        let err = CheckDefinitionError::malformed("TTL", &json!("bogus"), "invalid duration");
        assert_eq!(
            err.to_string(),
            r#"malformed value for TTL: "bogus" (invalid duration)"#
        );
        assert!(err.is_malformed_value());
    }

    #[test]
    fn test_entry_wraps_source() {
        let inner = CheckDefinitionError::malformed("Interval", &json!(true), "expected duration");
        let err = CheckDefinitionError::Entry {
            index: 2,
            source: Box::new(inner),
        };
        assert!(err.to_string().starts_with("check definition at index 2:"));
        assert!(err.is_malformed_value());
    }
}
