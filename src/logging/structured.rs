//! Structured logging utilities.
//!
//! Provides context-aware logging with the document source and check name
//! included in every log message.

use std::fmt;

/// Logging context for decoding one document.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub source: String,
    pub check: Option<String>,
}

impl LogContext {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            check: None,
        }
    }

    pub fn with_check(&self, check: &str) -> Self {
        Self {
            source: self.source.clone(),
            check: Some(check.to_string()),
        }
    }

    /// Context for the element at `index` of a definition array.
    pub fn with_index(&self, index: usize) -> Self {
        Self {
            source: format!("{}[{}]", self.source, index),
            check: self.check.clone(),
        }
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new("inline")
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.check {
            Some(name) => write!(f, "[source={}] [check={}]", self.source, name),
            None => write!(f, "[source={}]", self.source),
        }
    }
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),+ $(,)?) => {
        log::info!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),+), $($value),+)
        );
    };
}

/// Log a warning message with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),+ $(,)?) => {
        log::warn!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),+), $($value),+)
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),+ $(,)?) => {
        log::debug!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),+), $($value),+)
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_display() {
        let ctx = LogContext::new("checks.json");
        assert_eq!(format!("{}", ctx), "[source=checks.json]");

        let ctx_with_check = ctx.with_check("web");
        assert_eq!(
            format!("{}", ctx_with_check),
            "[source=checks.json] [check=web]"
        );
    }

    #[test]
    fn test_log_context_index() {
        let ctx = LogContext::new("checks.json").with_index(3);
        assert_eq!(format!("{}", ctx), "[source=checks.json[3]]");
    }

    #[test]
    fn test_macros_expand() {
        let ctx = LogContext::default();
        crate::log_debug!(ctx, "TEST_EVENT", field = "Interval", nanos = 10);
        crate::log_info!(ctx, "TEST_EVENT", count = 1usize);
    }
}
