//! Canonical check definition record.
//!
//! The normalized, dialect-resolved form of a check definition. Built once per
//! decode call by [`crate::decode`]; projections in [`crate::views`] read it.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize};

/// Health status strings understood by the health-status store.
pub const HEALTH_PASSING: &str = "passing";
pub const HEALTH_WARNING: &str = "warning";
pub const HEALTH_CRITICAL: &str = "critical";
pub const HEALTH_MAINTENANCE: &str = "maintenance";

/// Opaque check identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckId(String);

impl CheckId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CheckId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CheckId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A decoded check definition.
///
/// Serializes with primary-dialect keys and durations as integer
/// nanoseconds, so serializing and decoding again yields an equal record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckDefinition {
    #[serde(rename = "ID")]
    pub id: CheckId,
    pub name: String,
    pub notes: String,
    #[serde(rename = "ServiceID")]
    pub service_id: String,
    pub token: String,
    pub status: String,

    pub script_args: Vec<String>,
    #[serde(rename = "HTTP")]
    pub http: String,
    pub header: BTreeMap<String, Vec<String>>,
    pub method: String,
    #[serde(rename = "TCP")]
    pub tcp: String,
    #[serde(serialize_with = "nanos::serialize")]
    pub interval: Duration,
    #[serde(rename = "DockerContainerID")]
    pub docker_container_id: String,
    pub shell: String,
    #[serde(rename = "GRPC")]
    pub grpc: String,
    #[serde(rename = "GRPCUseTLS")]
    pub grpc_use_tls: bool,
    #[serde(rename = "TLSSkipVerify")]
    pub tls_skip_verify: bool,
    pub alias_node: String,
    pub alias_service: String,
    #[serde(serialize_with = "nanos::serialize")]
    pub timeout: Duration,
    #[serde(rename = "TTL", serialize_with = "nanos::serialize")]
    pub ttl: Duration,
    pub success_before_passing: i64,
    pub failures_before_critical: i64,
    #[serde(serialize_with = "nanos::serialize")]
    pub deregister_critical_service_after: Duration,
    pub output_max_size: i64,
}

impl Default for CheckDefinition {
    fn default() -> Self {
        Self {
            id: CheckId::default(),
            name: String::new(),
            notes: String::new(),
            service_id: String::new(),
            token: String::new(),
            status: String::new(),
            script_args: Vec::new(),
            http: String::new(),
            header: BTreeMap::new(),
            method: String::new(),
            tcp: String::new(),
            interval: Duration::zero(),
            docker_container_id: String::new(),
            shell: String::new(),
            grpc: String::new(),
            grpc_use_tls: false,
            tls_skip_verify: false,
            alias_node: String::new(),
            alias_service: String::new(),
            timeout: Duration::zero(),
            ttl: Duration::zero(),
            success_before_passing: 0,
            failures_before_critical: 0,
            deregister_critical_service_after: Duration::zero(),
            output_max_size: 0,
        }
    }
}

impl<'de> Deserialize<'de> for CheckDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = crate::decode::RawDocument::deserialize(deserializer)?;
        crate::decode::decode_raw(&raw, &crate::logging::structured::LogContext::default())
            .map_err(serde::de::Error::custom)
    }
}

/// Serialize a duration as a signed count of nanoseconds.
pub(crate) mod nanos {
    use chrono::Duration;
    use serde::{ser::Error, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let nanos = value
            .num_nanoseconds()
            .ok_or_else(|| S::Error::custom("duration exceeds the nanosecond range"))?;
        serializer.serialize_i64(nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_id_display() {
        let id = CheckId::from("service:web");
        assert_eq!(id.to_string(), "service:web");
        assert!(!id.is_empty());
        assert!(CheckId::default().is_empty());
    }

    #[test]
    fn test_serialize_primary_keys() {
        let def = CheckDefinition {
            id: CheckId::from("web-check"),
            name: "web".to_string(),
            service_id: "web-1".to_string(),
            interval: Duration::seconds(10),
            tls_skip_verify: true,
            ..Default::default()
        };

        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["ID"], json!("web-check"));
        assert_eq!(value["ServiceID"], json!("web-1"));
        assert_eq!(value["Interval"], json!(10_000_000_000i64));
        assert_eq!(value["TLSSkipVerify"], json!(true));
        assert_eq!(value["DeregisterCriticalServiceAfter"], json!(0));
        assert!(value.get("service_id").is_none());
    }

    #[test]
    fn test_deserialize_delegates_to_decoder() {
        let def: CheckDefinition =
            serde_json::from_str(r#"{"Name": "web", "service_id": "web-1", "TTL": "30s"}"#).unwrap();
        assert_eq!(def.service_id, "web-1");
        assert_eq!(def.ttl, Duration::seconds(30));

        let err = serde_json::from_str::<CheckDefinition>(r#"{"TTL": "bogus"}"#).unwrap_err();
        assert!(err.to_string().contains("TTL"));

        // repeated keys: the last one in the text wins
        let def: CheckDefinition =
            serde_json::from_str(r#"{"http": "a", "HTTP": "b", "http": ""}"#).unwrap();
        assert_eq!(def.http, "");
    }
}
