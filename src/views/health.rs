//! Health-status view.

use serde::{Deserialize, Serialize};

use crate::definition::{CheckDefinition, CheckId, HEALTH_CRITICAL};

/// Runtime health status of a check on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HealthCheck {
    pub node: String,
    #[serde(rename = "CheckID")]
    pub check_id: CheckId,
    pub name: String,
    pub status: String,
    pub notes: String,
    #[serde(rename = "ServiceID")]
    pub service_id: String,
}

/// Project a definition into its initial health status on `node`.
///
/// Status defaults to critical when the definition sets none. An empty check
/// id borrows the check name; the definition itself is left untouched.
pub fn to_health_check(definition: &CheckDefinition, node: &str) -> HealthCheck {
    let status = if definition.status.is_empty() {
        HEALTH_CRITICAL.to_string()
    } else {
        definition.status.clone()
    };

    let check_id = if definition.id.is_empty() && !definition.name.is_empty() {
        CheckId::from(definition.name.as_str())
    } else {
        definition.id.clone()
    };

    HealthCheck {
        node: node.to_string(),
        check_id,
        name: definition.name.clone(),
        status,
        notes: definition.notes.clone(),
        service_id: definition.service_id.clone(),
    }
}

impl CheckDefinition {
    /// See [`to_health_check`].
    pub fn health_check(&self, node: &str) -> HealthCheck {
        to_health_check(self, node)
    }
}
