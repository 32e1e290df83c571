//! Check-execution view.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Duration;
use serde::Serialize;

use crate::definition::{nanos, CheckDefinition, CheckId};

/// Kind of check an execution engine would run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    Ttl,
    Http,
    Tcp,
    Grpc,
    Docker,
    Script,
    Alias,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Ttl => "ttl",
            CheckKind::Http => "http",
            CheckKind::Tcp => "tcp",
            CheckKind::Grpc => "grpc",
            CheckKind::Docker => "docker",
            CheckKind::Script => "script",
            CheckKind::Alias => "alias",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check specification handed to the execution engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckType {
    #[serde(rename = "CheckID")]
    pub check_id: CheckId,
    pub name: String,
    pub status: String,
    pub notes: String,

    pub script_args: Vec<String>,
    pub alias_node: String,
    pub alias_service: String,
    #[serde(rename = "HTTP")]
    pub http: String,
    #[serde(rename = "GRPC")]
    pub grpc: String,
    #[serde(rename = "GRPCUseTLS")]
    pub grpc_use_tls: bool,
    pub header: BTreeMap<String, Vec<String>>,
    pub method: String,
    pub output_max_size: i64,
    #[serde(rename = "TCP")]
    pub tcp: String,
    #[serde(serialize_with = "nanos::serialize")]
    pub interval: Duration,
    #[serde(rename = "DockerContainerID")]
    pub docker_container_id: String,
    pub shell: String,
    #[serde(rename = "TLSSkipVerify")]
    pub tls_skip_verify: bool,
    #[serde(serialize_with = "nanos::serialize")]
    pub timeout: Duration,
    #[serde(rename = "TTL", serialize_with = "nanos::serialize")]
    pub ttl: Duration,
    pub success_before_passing: i64,
    pub failures_before_critical: i64,
    #[serde(serialize_with = "nanos::serialize")]
    pub deregister_critical_service_after: Duration,
}

/// Project a definition into a check specification. Plain copy: no
/// identifier or status defaulting happens here.
pub fn to_check_type(definition: &CheckDefinition) -> CheckType {
    CheckType {
        check_id: definition.id.clone(),
        name: definition.name.clone(),
        status: definition.status.clone(),
        notes: definition.notes.clone(),

        script_args: definition.script_args.clone(),
        alias_node: definition.alias_node.clone(),
        alias_service: definition.alias_service.clone(),
        http: definition.http.clone(),
        grpc: definition.grpc.clone(),
        grpc_use_tls: definition.grpc_use_tls,
        header: definition.header.clone(),
        method: definition.method.clone(),
        output_max_size: definition.output_max_size,
        tcp: definition.tcp.clone(),
        interval: definition.interval,
        docker_container_id: definition.docker_container_id.clone(),
        shell: definition.shell.clone(),
        tls_skip_verify: definition.tls_skip_verify,
        timeout: definition.timeout,
        ttl: definition.ttl,
        success_before_passing: definition.success_before_passing,
        failures_before_critical: definition.failures_before_critical,
        deregister_critical_service_after: definition.deregister_critical_service_after,
    }
}

impl CheckDefinition {
    /// See [`to_check_type`].
    pub fn check_type(&self) -> CheckType {
        to_check_type(self)
    }
}

impl CheckType {
    fn has_interval(&self) -> bool {
        self.interval > Duration::zero()
    }

    pub fn is_ttl(&self) -> bool {
        self.ttl > Duration::zero()
    }

    pub fn is_script(&self) -> bool {
        !self.script_args.is_empty()
    }

    /// Script run on the agent host.
    pub fn is_monitor(&self) -> bool {
        self.is_script() && self.docker_container_id.is_empty() && self.has_interval()
    }

    /// Script run inside a Docker container.
    pub fn is_docker(&self) -> bool {
        self.is_script() && !self.docker_container_id.is_empty() && self.has_interval()
    }

    pub fn is_http(&self) -> bool {
        !self.http.is_empty() && self.has_interval()
    }

    pub fn is_tcp(&self) -> bool {
        !self.tcp.is_empty() && self.has_interval()
    }

    pub fn is_grpc(&self) -> bool {
        !self.grpc.is_empty() && self.has_interval()
    }

    pub fn is_alias(&self) -> bool {
        !self.alias_service.is_empty()
    }

    /// First matching kind, or `None` when no kind's requirements are met.
    /// Several kinds may match; exclusivity is left to validation.
    pub fn kind(&self) -> Option<CheckKind> {
        if self.is_ttl() {
            Some(CheckKind::Ttl)
        } else if self.is_http() {
            Some(CheckKind::Http)
        } else if self.is_tcp() {
            Some(CheckKind::Tcp)
        } else if self.is_grpc() {
            Some(CheckKind::Grpc)
        } else if self.is_docker() {
            Some(CheckKind::Docker)
        } else if self.is_monitor() {
            Some(CheckKind::Script)
        } else if self.is_alias() {
            Some(CheckKind::Alias)
        } else {
            None
        }
    }
}
