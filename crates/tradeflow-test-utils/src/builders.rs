//! Builders for domain snapshots used in tests.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use tradeflow_core::{
    FileRef, FinishedStep, ImageRef, StepIdentity, TenantId, VehicleId, VehicleKind,
    VehicleSnapshot, WorkflowInstanceId,
};

/// Midday UTC timestamp for a calendar date, for deterministic fixtures
pub fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// A finished-step record for the given instance, step and date
pub fn finished_step(instance: &str, step: &str, finished_at: DateTime<Utc>) -> FinishedStep {
    FinishedStep {
        workflow_instance_id: WorkflowInstanceId(instance.to_string()),
        step_identity: StepIdentity::new(step),
        finished_at,
        additional_value: None,
    }
}

/// Builder for [`VehicleSnapshot`] values with sensible defaults
pub struct VehicleSnapshotBuilder {
    id: VehicleId,
    kind: VehicleKind,
    tenant: TenantId,
    attributes: serde_json::Map<String, Value>,
    files: Vec<FileRef>,
    images: Vec<ImageRef>,
}

impl VehicleSnapshotBuilder {
    /// Start a builder for the default test tenant ("company-a")
    pub fn new() -> Self {
        Self {
            id: VehicleId(uuid::Uuid::new_v4().to_string()),
            kind: VehicleKind::Car,
            tenant: TenantId("company-a".to_string()),
            attributes: serde_json::Map::new(),
            files: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Use a fixed vehicle id
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = VehicleId(id.to_string());
        self
    }

    /// Use a specific vehicle kind
    pub fn with_kind(mut self, kind: VehicleKind) -> Self {
        self.kind = kind;
        self
    }

    /// Use a specific tenant
    pub fn with_tenant(mut self, tenant: &str) -> Self {
        self.tenant = TenantId(tenant.to_string());
        self
    }

    /// Set a live vehicle attribute
    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    /// Attach a file under a section
    pub fn with_file(mut self, id: &str, name: &str, section: Option<&str>) -> Self {
        self.files.push(FileRef {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("/files/{}", id),
            section: section.map(str::to_string),
        });
        self
    }

    /// Attach an image under a section
    pub fn with_image(mut self, id: &str, section: Option<&str>) -> Self {
        self.images.push(ImageRef {
            id: id.to_string(),
            url: format!("/images/{}", id),
            section: section.map(str::to_string),
        });
        self
    }

    /// Build the snapshot
    pub fn build(self) -> VehicleSnapshot {
        VehicleSnapshot {
            id: self.id,
            kind: self.kind,
            tenant: self.tenant,
            attributes: Value::Object(self.attributes),
            files: self.files,
            images: self.images,
        }
    }
}

impl Default for VehicleSnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
