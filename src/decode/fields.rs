//! Field table for check definition documents.
//!
//! Every key the decoder understands, in both dialects, maps to a [`Slot`].
//! Key lookup follows the JSON configuration convention of this record: an
//! exact key match wins, otherwise an ASCII case-insensitive match is used.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Shape a slot's value must have in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Bool,
    Int,
    StrList,
    Header,
    /// Duration literal string or raw nanosecond count
    Duration,
}

/// Which key-naming convention a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Primary,
    Alternate,
}

/// A decoder slot. Primary slots map onto record fields; alternate slots
/// live in the overlay until dialect resolution folds them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Id,
    Name,
    Notes,
    ServiceId,
    Token,
    Status,
    ScriptArgs,
    Http,
    Header,
    Method,
    Tcp,
    Interval,
    DockerContainerId,
    Shell,
    Grpc,
    GrpcUseTls,
    TlsSkipVerify,
    AliasNode,
    AliasService,
    Timeout,
    Ttl,
    SuccessBeforePassing,
    FailuresBeforeCritical,
    DeregisterCriticalServiceAfter,
    OutputMaxSize,

    ArgsAlt,
    ScriptArgsAlt,
    DeregisterCriticalServiceAfterAlt,
    DockerContainerIdAlt,
    TlsSkipVerifyAlt,
    ServiceIdAlt,
}

impl Slot {
    pub const ALL: [Slot; 31] = [
        Slot::Id,
        Slot::Name,
        Slot::Notes,
        Slot::ServiceId,
        Slot::Token,
        Slot::Status,
        Slot::ScriptArgs,
        Slot::Http,
        Slot::Header,
        Slot::Method,
        Slot::Tcp,
        Slot::Interval,
        Slot::DockerContainerId,
        Slot::Shell,
        Slot::Grpc,
        Slot::GrpcUseTls,
        Slot::TlsSkipVerify,
        Slot::AliasNode,
        Slot::AliasService,
        Slot::Timeout,
        Slot::Ttl,
        Slot::SuccessBeforePassing,
        Slot::FailuresBeforeCritical,
        Slot::DeregisterCriticalServiceAfter,
        Slot::OutputMaxSize,
        Slot::ArgsAlt,
        Slot::ScriptArgsAlt,
        Slot::DeregisterCriticalServiceAfterAlt,
        Slot::DockerContainerIdAlt,
        Slot::TlsSkipVerifyAlt,
        Slot::ServiceIdAlt,
    ];

    /// Document key for this slot.
    pub fn key(self) -> &'static str {
        match self {
            Slot::Id => "ID",
            Slot::Name => "Name",
            Slot::Notes => "Notes",
            Slot::ServiceId => "ServiceID",
            Slot::Token => "Token",
            Slot::Status => "Status",
            Slot::ScriptArgs => "ScriptArgs",
            Slot::Http => "HTTP",
            Slot::Header => "Header",
            Slot::Method => "Method",
            Slot::Tcp => "TCP",
            Slot::Interval => "Interval",
            Slot::DockerContainerId => "DockerContainerID",
            Slot::Shell => "Shell",
            Slot::Grpc => "GRPC",
            Slot::GrpcUseTls => "GRPCUseTLS",
            Slot::TlsSkipVerify => "TLSSkipVerify",
            Slot::AliasNode => "AliasNode",
            Slot::AliasService => "AliasService",
            Slot::Timeout => "Timeout",
            Slot::Ttl => "TTL",
            Slot::SuccessBeforePassing => "SuccessBeforePassing",
            Slot::FailuresBeforeCritical => "FailuresBeforeCritical",
            Slot::DeregisterCriticalServiceAfter => "DeregisterCriticalServiceAfter",
            Slot::OutputMaxSize => "OutputMaxSize",
            Slot::ArgsAlt => "args",
            Slot::ScriptArgsAlt => "script_args",
            Slot::DeregisterCriticalServiceAfterAlt => "deregister_critical_service_after",
            Slot::DockerContainerIdAlt => "docker_container_id",
            Slot::TlsSkipVerifyAlt => "tls_skip_verify",
            Slot::ServiceIdAlt => "service_id",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Slot::ScriptArgs | Slot::ArgsAlt | Slot::ScriptArgsAlt => FieldKind::StrList,
            Slot::Header => FieldKind::Header,
            Slot::GrpcUseTls | Slot::TlsSkipVerify | Slot::TlsSkipVerifyAlt => FieldKind::Bool,
            Slot::SuccessBeforePassing | Slot::FailuresBeforeCritical | Slot::OutputMaxSize => {
                FieldKind::Int
            }
            Slot::Interval
            | Slot::Timeout
            | Slot::Ttl
            | Slot::DeregisterCriticalServiceAfter
            | Slot::DeregisterCriticalServiceAfterAlt => FieldKind::Duration,
            _ => FieldKind::Str,
        }
    }

    pub fn dialect(self) -> Dialect {
        match self {
            Slot::ArgsAlt
            | Slot::ScriptArgsAlt
            | Slot::DeregisterCriticalServiceAfterAlt
            | Slot::DockerContainerIdAlt
            | Slot::TlsSkipVerifyAlt
            | Slot::ServiceIdAlt => Dialect::Alternate,
            _ => Dialect::Primary,
        }
    }
}

lazy_static! {
    static ref EXACT_KEYS: HashMap<&'static str, Slot> =
        Slot::ALL.iter().map(|slot| (slot.key(), *slot)).collect();

    static ref FOLDED_KEYS: HashMap<String, Slot> = Slot::ALL
        .iter()
        .map(|slot| (slot.key().to_ascii_lowercase(), *slot))
        .collect();
}

/// Resolve a document key to its slot. Unknown keys resolve to `None`.
pub fn slot_for_key(key: &str) -> Option<Slot> {
    if let Some(slot) = EXACT_KEYS.get(key) {
        return Some(*slot);
    }
    FOLDED_KEYS.get(&key.to_ascii_lowercase()).copied()
}
