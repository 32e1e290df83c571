//! Dialect overlay.
//!
//! A document is first read into an [`Overlay`]: every recognised key lands
//! in its slot, primary and alternate dialect alike, with duration slots kept
//! raw. [`Overlay::resolve_dialect`] then folds alternate slots into their
//! primary counterparts following [`ALIAS_RULES`].

use std::collections::BTreeMap;

use chrono::Duration;
use serde_json::{Map, Value};

use crate::decode::duration::RawDuration;
use crate::decode::fields::{slot_for_key, Dialect, Slot};
use crate::decode::value::{coerce, SlotValue};
use crate::error::Result;
use crate::logging::structured::LogContext;

/// How an alternate value is merged into its primary slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// Copy the first populated alternate when the primary is absent or empty.
    FillEmpty,
    /// Copy the first present alternate when the primary is absent.
    FillAbsent,
    /// Set the primary to `true` when an alternate is `true`. A `false`
    /// alternate never clears the primary.
    PromoteTrue,
}

/// One dialect alias: a primary slot and its alternates in priority order.
#[derive(Debug)]
pub struct AliasRule {
    pub primary: Slot,
    pub alternates: &'static [Slot],
    pub merge: Merge,
}

pub const ALIAS_RULES: &[AliasRule] = &[
    AliasRule {
        primary: Slot::ScriptArgs,
        alternates: &[Slot::ArgsAlt, Slot::ScriptArgsAlt],
        merge: Merge::FillEmpty,
    },
    AliasRule {
        primary: Slot::DeregisterCriticalServiceAfter,
        alternates: &[Slot::DeregisterCriticalServiceAfterAlt],
        merge: Merge::FillAbsent,
    },
    AliasRule {
        primary: Slot::DockerContainerId,
        alternates: &[Slot::DockerContainerIdAlt],
        merge: Merge::FillEmpty,
    },
    AliasRule {
        primary: Slot::TlsSkipVerify,
        alternates: &[Slot::TlsSkipVerifyAlt],
        merge: Merge::PromoteTrue,
    },
    AliasRule {
        primary: Slot::ServiceId,
        alternates: &[Slot::ServiceIdAlt],
        merge: Merge::FillEmpty,
    },
];

/// A slot value together with the document key it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: SlotValue,
}

/// Slot-keyed view of one document.
#[derive(Debug, Default)]
pub struct Overlay {
    entries: BTreeMap<Slot, Entry>,
}

impl Overlay {
    /// Read every recognised key of `object` into its slot.
    ///
    /// Unknown keys are ignored and `null` leaves a slot unset. When several
    /// keys resolve to the same slot, the last one in document order wins.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self> {
        Self::from_entries(object.iter())
    }

    /// Read `(key, value)` pairs in document order. Unlike a parsed
    /// [`Map`], the pairs may repeat a key.
    pub fn from_entries<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        let mut entries = BTreeMap::new();

        for (key, value) in pairs {
            let Some(slot) = slot_for_key(key) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            let value = coerce(slot.kind(), key, value)?;
            entries.insert(
                slot,
                Entry {
                    key: key.clone(),
                    value,
                },
            );
        }

        Ok(Self { entries })
    }

    pub fn get(&self, slot: Slot) -> Option<&Entry> {
        self.entries.get(&slot)
    }

    /// Number of slots populated from alternate-dialect keys.
    pub fn alternate_count(&self) -> usize {
        self.entries
            .keys()
            .filter(|slot| slot.dialect() == Dialect::Alternate)
            .count()
    }

    /// Fold alternate slots into their primary slots.
    pub fn resolve_dialect(&mut self, ctx: &LogContext) {
        for rule in ALIAS_RULES {
            match rule.merge {
                Merge::FillEmpty | Merge::FillAbsent => self.fill(rule, ctx),
                Merge::PromoteTrue => self.promote_true(rule, ctx),
            }
        }
    }

    fn fill(&mut self, rule: &AliasRule, ctx: &LogContext) {
        let primary_set = match (self.entries.get(&rule.primary), rule.merge) {
            (None, _) => false,
            (Some(entry), Merge::FillEmpty) => !entry.value.is_empty(),
            (Some(_), _) => true,
        };

        if primary_set {
            for alt in rule.alternates {
                if let Some(entry) = self.entries.get(alt) {
                    crate::log_debug!(
                        ctx,
                        "DIALECT_ALIAS_IGNORED",
                        field = rule.primary.key(),
                        alternate = entry.key.as_str(),
                    );
                }
            }
            return;
        }

        let replacement = rule.alternates.iter().find_map(|alt| {
            self.entries
                .get(alt)
                .filter(|entry| rule.merge == Merge::FillAbsent || !entry.value.is_empty())
                .cloned()
        });

        if let Some(entry) = replacement {
            crate::log_debug!(
                ctx,
                "DIALECT_ALIAS_APPLIED",
                field = rule.primary.key(),
                alternate = entry.key.as_str(),
            );
            self.entries.insert(rule.primary, entry);
        }
    }

    fn promote_true(&mut self, rule: &AliasRule, ctx: &LogContext) {
        let Some(entry) = rule.alternates.iter().find_map(|alt| {
            self.entries
                .get(alt)
                .filter(|entry| entry.value == SlotValue::Bool(true))
                .cloned()
        }) else {
            return;
        };

        crate::log_debug!(
            ctx,
            "DIALECT_ALIAS_APPLIED",
            field = rule.primary.key(),
            alternate = entry.key.as_str(),
        );
        self.entries.insert(rule.primary, entry);
    }

    pub fn take_string(&mut self, slot: Slot) -> String {
        match self.entries.remove(&slot).map(|e| e.value) {
            Some(SlotValue::Str(s)) => s,
            _ => String::new(),
        }
    }

    pub fn take_bool(&mut self, slot: Slot) -> bool {
        matches!(
            self.entries.remove(&slot).map(|e| e.value),
            Some(SlotValue::Bool(true))
        )
    }

    pub fn take_int(&mut self, slot: Slot) -> i64 {
        match self.entries.remove(&slot).map(|e| e.value) {
            Some(SlotValue::Int(i)) => i,
            _ => 0,
        }
    }

    pub fn take_string_list(&mut self, slot: Slot) -> Vec<String> {
        match self.entries.remove(&slot).map(|e| e.value) {
            Some(SlotValue::StrList(list)) => list,
            _ => Vec::new(),
        }
    }

    pub fn take_header(&mut self, slot: Slot) -> BTreeMap<String, Vec<String>> {
        match self.entries.remove(&slot).map(|e| e.value) {
            Some(SlotValue::Header(header)) => header,
            _ => BTreeMap::new(),
        }
    }

    /// Normalize a duration slot from its own raw value. Absent is zero.
    pub fn take_duration(&mut self, slot: Slot, ctx: &LogContext) -> Result<Duration> {
        let Some(entry) = self.entries.remove(&slot) else {
            return Ok(Duration::zero());
        };
        let SlotValue::Duration(raw) = &entry.value else {
            return Ok(Duration::zero());
        };

        let duration = raw.normalize(&entry.key)?;
        crate::log_debug!(
            ctx,
            "DURATION_NORMALIZED",
            field = entry.key.as_str(),
            form = match raw {
                RawDuration::Literal(_) => "literal",
                RawDuration::Nanos(_) => "nanos",
            },
            nanos = duration.num_nanoseconds(),
        );
        Ok(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn overlay(doc: Value) -> Overlay {
        let mut overlay = Overlay::from_object(doc.as_object().unwrap()).unwrap();
        overlay.resolve_dialect(&LogContext::default());
        overlay
    }

    #[test]
    fn test_last_key_wins() {
        let mut o = overlay(json!({"http": "", "HTTP": "http://x"}));
        assert_eq!(o.take_string(Slot::Http), "http://x");

        let mut o = overlay(json!({"HTTP": "http://x", "http": "http://y"}));
        assert_eq!(o.take_string(Slot::Http), "http://y");
    }

    #[test]
    fn test_repeated_pairs_last_wins() {
        let pairs = vec![
            ("http".to_string(), json!("a")),
            ("HTTP".to_string(), json!("b")),
            ("http".to_string(), json!("")),
        ];
        let mut o = Overlay::from_entries(pairs.iter().map(|(k, v)| (k, v))).unwrap();
        assert_eq!(o.get(Slot::Http).map(|e| e.key.as_str()), Some("http"));
        assert_eq!(o.take_string(Slot::Http), "");
    }

    #[test]
    fn test_null_and_unknown_ignored() {
        let mut o = overlay(json!({"Name": null, "Port": 80, "Notes": "n"}));
        assert!(o.get(Slot::Name).is_none());
        assert_eq!(o.take_string(Slot::Notes), "n");
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let doc = json!({"Name": ["web"]});
        assert!(Overlay::from_object(doc.as_object().unwrap()).is_err());
        let doc = json!({"tls_skip_verify": "yes"});
        assert!(Overlay::from_object(doc.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_script_args_priority() {
        let mut o = overlay(json!({"script_args": ["b"], "args": ["a"]}));
        assert_eq!(o.take_string_list(Slot::ScriptArgs), vec!["a"]);

        let mut o = overlay(json!({"script_args": ["b"], "args": []}));
        assert_eq!(o.take_string_list(Slot::ScriptArgs), vec!["b"]);

        let mut o = overlay(json!({"ScriptArgs": ["p"], "args": ["a"], "script_args": ["b"]}));
        assert_eq!(o.take_string_list(Slot::ScriptArgs), vec!["p"]);
    }

    #[test]
    fn test_fill_empty_primary() {
        let mut o = overlay(json!({"ServiceID": "", "service_id": "web-1"}));
        assert_eq!(o.take_string(Slot::ServiceId), "web-1");

        let mut o = overlay(json!({"DockerContainerID": "abc", "docker_container_id": "def"}));
        assert_eq!(o.take_string(Slot::DockerContainerId), "abc");
    }

    // Only a true alternate propagates; false never clears a true primary.
    #[test]
    fn test_skip_verify_is_one_directional() {
        let cases = [
            (Some(false), Some(true), true),
            (Some(true), Some(false), true),
            (Some(false), Some(false), false),
            (None, Some(true), true),
            (None, Some(false), false),
            (Some(true), None, true),
        ];
        for (primary, alternate, expected) in cases {
            let mut doc = Map::new();
            if let Some(p) = primary {
                doc.insert("TLSSkipVerify".to_string(), json!(p));
            }
            if let Some(a) = alternate {
                doc.insert("tls_skip_verify".to_string(), json!(a));
            }
            let mut o = Overlay::from_object(&doc).unwrap();
            o.resolve_dialect(&LogContext::default());
            assert_eq!(
                o.take_bool(Slot::TlsSkipVerify),
                expected,
                "primary={:?} alternate={:?}",
                primary,
                alternate
            );
        }
    }

    #[test]
    fn test_deregister_fill_absent() {
        let ctx = LogContext::default();
        let mut o = overlay(json!({"deregister_critical_service_after": 5_000_000_000i64}));
        assert_eq!(
            o.take_duration(Slot::DeregisterCriticalServiceAfter, &ctx).unwrap(),
            Duration::seconds(5)
        );

        let mut o = overlay(json!({
            "DeregisterCriticalServiceAfter": "1m",
            "deregister_critical_service_after": "5m"
        }));
        assert_eq!(
            o.take_duration(Slot::DeregisterCriticalServiceAfter, &ctx).unwrap(),
            Duration::minutes(1)
        );
    }

    #[test]
    fn test_alternate_count() {
        let o = overlay(json!({"Name": "web", "service_id": "a", "args": ["x"]}));
        // service_id and args stay in the overlay after being copied
        assert_eq!(o.alternate_count(), 2);
    }
}
