//! Duration field normalization.
//!
//! A duration field arrives either as a duration literal (`"10s"`,
//! `"1h30m"`, `"250ms"`) or as a raw count of nanoseconds. Both end up as a
//! [`chrono::Duration`].

use chrono::Duration;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Number, Value};

use crate::error::{CheckDefinitionError, Result};

const NANOS_PER_MICRO: i128 = 1_000;
const NANOS_PER_MILLI: i128 = 1_000_000;
const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;

/// Fraction digits beyond this contribute less than a nanosecond even for hours.
const MAX_FRACTION_DIGITS: usize = 18;

lazy_static! {
    /// Whole-literal grammar: optional sign, then `0` or one or more
    /// decimal/unit terms.
    static ref DURATION_LITERAL: Regex = Regex::new(
        r"^[-+]?(0|(([0-9]+(\.[0-9]*)?|\.[0-9]+)(ns|us|µs|μs|ms|s|m|h))+)$"
    )
    .unwrap();

    /// One decimal/unit term within a validated literal.
    static ref DURATION_TERM: Regex =
        Regex::new(r"([0-9]*)(?:\.([0-9]*))?(ns|us|µs|μs|ms|s|m|h)").unwrap();
}

/// Raw, not yet normalized, duration slot value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDuration {
    Literal(String),
    Nanos(Number),
}

impl RawDuration {
    /// Classify a document value. Anything but a string or number is malformed.
    pub fn from_value(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(RawDuration::Literal(s.clone())),
            Value::Number(n) => Ok(RawDuration::Nanos(n.clone())),
            _ => Err(CheckDefinitionError::malformed(
                key,
                value,
                "expected a duration string or nanosecond count",
            )),
        }
    }

    /// Normalize into a duration. `key` names the field in errors.
    pub fn normalize(&self, key: &str) -> Result<Duration> {
        match self {
            RawDuration::Literal(literal) => parse_duration_literal(literal).map_err(|reason| {
                CheckDefinitionError::malformed(key, &Value::String(literal.clone()), reason)
            }),
            RawDuration::Nanos(n) => nanos_to_duration(n).map_err(|reason| {
                CheckDefinitionError::malformed(key, &Value::Number(n.clone()), reason)
            }),
        }
    }
}

/// Parse a duration literal such as `"300ms"`, `"-1.5h"` or `"2h45m"`.
pub fn parse_duration_literal(literal: &str) -> std::result::Result<Duration, String> {
    if !DURATION_LITERAL.is_match(literal) {
        return Err("invalid duration literal".to_string());
    }

    let (negative, body) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };
    if body == "0" {
        return Ok(Duration::zero());
    }

    let overflow = || "duration literal out of range".to_string();
    let mut total: i128 = 0;

    for term in DURATION_TERM.captures_iter(body) {
        let unit = unit_nanos(&term[3]);

        let whole: i128 = match &term[1] {
            "" => 0,
            digits => digits.parse().map_err(|_| overflow())?,
        };
        total = whole
            .checked_mul(unit)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(overflow)?;

        if let Some(fraction) = term.get(2) {
            let digits = &fraction.as_str()[..fraction.as_str().len().min(MAX_FRACTION_DIGITS)];
            if !digits.is_empty() {
                let value: i128 = digits.parse().map_err(|_| overflow())?;
                let scale = 10i128.pow(digits.len() as u32);
                total += value * unit / scale;
            }
        }

        // i64::MIN magnitude is the largest a literal may reach
        if total > i64::MAX as i128 + 1 {
            return Err(overflow());
        }
    }

    let signed = if negative { -total } else { total };
    i64::try_from(signed)
        .map(Duration::nanoseconds)
        .map_err(|_| overflow())
}

fn unit_nanos(unit: &str) -> i128 {
    match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => NANOS_PER_MICRO,
        "ms" => NANOS_PER_MILLI,
        "s" => NANOS_PER_SECOND,
        "m" => NANOS_PER_MINUTE,
        _ => NANOS_PER_HOUR,
    }
}

/// A numeric duration is a nanosecond count taken verbatim. Fractional
/// counts truncate toward zero.
fn nanos_to_duration(n: &Number) -> std::result::Result<Duration, String> {
    if let Some(nanos) = n.as_i64() {
        return Ok(Duration::nanoseconds(nanos));
    }
    if n.is_u64() {
        return Err("nanosecond count out of range".to_string());
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f >= -9_223_372_036_854_775_808.0 && f < 9_223_372_036_854_775_808.0 => {
            Ok(Duration::nanoseconds(f.trunc() as i64))
        }
        _ => Err("nanosecond count out of range".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(s: &str) -> Duration {
        parse_duration_literal(s).unwrap()
    }

    #[test]
    fn test_simple_literals() {
        assert_eq!(parse("5s"), Duration::seconds(5));
        assert_eq!(parse("10s").num_nanoseconds(), Some(10_000_000_000));
        assert_eq!(parse("300ms"), Duration::milliseconds(300));
        assert_eq!(parse("1h"), Duration::hours(1));
        assert_eq!(parse("2m"), Duration::minutes(2));
        assert_eq!(parse("7ns"), Duration::nanoseconds(7));
    }

    #[test]
    fn test_microsecond_spellings() {
        assert_eq!(parse("2us"), Duration::microseconds(2));
        assert_eq!(parse("2µs"), Duration::microseconds(2));
        assert_eq!(parse("2μs"), Duration::microseconds(2));
    }

    #[test]
    fn test_compound_and_fractional() {
        assert_eq!(parse("1h30m"), Duration::minutes(90));
        assert_eq!(parse("1.5s"), Duration::milliseconds(1500));
        assert_eq!(parse(".5s"), Duration::milliseconds(500));
        assert_eq!(parse("1.s"), Duration::seconds(1));
        assert_eq!(parse("1.5ns"), Duration::nanoseconds(1));
        assert_eq!(parse("2h45m30.5s"), Duration::milliseconds(9_930_500));
    }

    #[test]
    fn test_signs_and_zero() {
        assert_eq!(parse("-2m"), Duration::minutes(-2));
        assert_eq!(parse("+2m"), Duration::minutes(2));
        assert_eq!(parse("0"), Duration::zero());
        assert_eq!(parse("-0"), Duration::zero());
        assert_eq!(parse("0s"), Duration::zero());
    }

    #[test]
    fn test_malformed_literals() {
        for bad in ["bogus", "", "5", "1.5", "s", ".", ".s", "1d", "5 s", " 5s", "-", "5S", "1h-30m"] {
            assert!(parse_duration_literal(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_range_limits() {
        assert_eq!(parse("2562047h47m16.854775807s").num_nanoseconds(), Some(i64::MAX));
        assert_eq!(parse("-2562047h47m16.854775808s").num_nanoseconds(), Some(i64::MIN));
        assert!(parse_duration_literal("2562047h47m16.854775808s").is_err());
        assert!(parse_duration_literal("9999999999h").is_err());
        assert!(parse_duration_literal("99999999999999999999999999999999999999999s").is_err());
    }

    #[test]
    fn test_numeric_nanos_verbatim() {
        let raw = RawDuration::from_value("TTL", &json!(5_000_000_000i64)).unwrap();
        assert_eq!(raw.normalize("TTL").unwrap().num_nanoseconds(), Some(5_000_000_000));

        let raw = RawDuration::from_value("TTL", &json!(-3)).unwrap();
        assert_eq!(raw.normalize("TTL").unwrap(), Duration::nanoseconds(-3));
    }

    #[test]
    fn test_numeric_float_truncates() {
        let raw = RawDuration::from_value("Interval", &json!(1.9)).unwrap();
        assert_eq!(raw.normalize("Interval").unwrap(), Duration::nanoseconds(1));
        let raw = RawDuration::from_value("Interval", &json!(-1.9)).unwrap();
        assert_eq!(raw.normalize("Interval").unwrap(), Duration::nanoseconds(-1));
    }

    #[test]
    fn test_numeric_out_of_range() {
        let raw = RawDuration::from_value("Timeout", &json!(u64::MAX)).unwrap();
        assert!(raw.normalize("Timeout").is_err());
        let raw = RawDuration::from_value("Timeout", &json!(1e300)).unwrap();
        assert!(raw.normalize("Timeout").is_err());
    }

    #[test]
    fn test_other_types_rejected() {
        for bad in [json!(true), json!([1]), json!({"s": 1})] {
            let err = RawDuration::from_value("TTL", &bad).unwrap_err();
            assert!(err.is_malformed_value());
        }
    }

    #[test]
    fn test_malformed_literal_names_field_and_value() {
        let raw = RawDuration::from_value("Interval", &json!("bogus")).unwrap();
        let err = raw.normalize("Interval").unwrap_err();
        match err {
            CheckDefinitionError::MalformedValue { field, value, .. } => {
                assert_eq!(field, "Interval");
                assert_eq!(value, "\"bogus\"");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
