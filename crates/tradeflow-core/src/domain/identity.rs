//! Identity value objects for the workflow component model.
//!
//! Every identity is a stable string key declared at definition time.
//! Step identities double as persistence keys for finished-step rows, so
//! they must never change across deployments.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value object: step identity (persistence key for finished-step rows)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepIdentity(pub String);

impl StepIdentity {
    /// Create a step identity from a static definition key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

/// Value object: status identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusIdentity(pub String);

/// Value object: subprocess identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubprocessIdentity(pub String);

/// Value object: process identity (one per conceptual trade type)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessIdentity(pub String);

/// Value object: tenant (company) identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub String);

/// Value object: workflow instance identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowInstanceId(pub String);

impl WorkflowInstanceId {
    /// Generate a fresh workflow instance identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Value object: vehicle identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub String);

/// Value object: acting user identifier.
///
/// Always passed explicitly into operations that need it; the engine never
/// reads an ambient authentication context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);
