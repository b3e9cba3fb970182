//! Workflow: the aggregate handed to the presentation layer.

use std::sync::Arc;

use serde::Serialize;

use super::identity::{VehicleId, WorkflowInstanceId};
use super::process::Process;
use super::vehicle::{FileRef, ImageRef, VehicleKind, VehicleSnapshot};

/// Aggregate binding one vehicle to its materialized process tree.
///
/// Pure data holder: all derived computation happens recursively during
/// [`Process`] materialization. The vehicle snapshot is shared, not owned;
/// the aggregate owns only the transient tree it carries, which is discarded
/// after the request. Serialization covers the fields the view layer needs.
#[derive(Debug, Clone, Serialize)]
pub struct Workflow {
    /// Workflow instance identifier
    pub id: WorkflowInstanceId,

    /// Identifier of the tracked vehicle
    pub vehicle_id: VehicleId,

    /// Polymorphic kind tag of the tracked vehicle
    pub vehicle_kind: VehicleKind,

    /// Shared vehicle snapshot the tree was built from
    #[serde(skip)]
    pub vehicle: Arc<VehicleSnapshot>,

    /// The materialized process tree
    pub process: Process,

    /// Pre-fetched image collection for the view layer
    pub images: Vec<ImageRef>,

    /// Pre-fetched file collection for the view layer
    pub files: Vec<FileRef>,
}

impl Workflow {
    /// Assemble the aggregate from a materialized process and the snapshot
    /// it was built from
    pub fn new(id: WorkflowInstanceId, vehicle: Arc<VehicleSnapshot>, process: Process) -> Self {
        Self {
            id,
            vehicle_id: vehicle.id.clone(),
            vehicle_kind: vehicle.kind,
            images: vehicle.images.clone(),
            files: vehicle.files.clone(),
            vehicle,
            process,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::{ProcessIdentity, TenantId};

    fn vehicle() -> Arc<VehicleSnapshot> {
        Arc::new(VehicleSnapshot {
            id: VehicleId("veh-9".to_string()),
            kind: VehicleKind::Truck,
            tenant: TenantId("company-a".to_string()),
            attributes: serde_json::json!({}),
            files: vec![FileRef {
                id: "f1".to_string(),
                name: "cmr.pdf".to_string(),
                url: "/files/f1".to_string(),
                section: None,
            }],
            images: Vec::new(),
        })
    }

    fn empty_process() -> Process {
        Process {
            identity: ProcessIdentity("trade-import".to_string()),
            display_name: "Trade - Import".to_string(),
            subprocesses: Vec::new(),
            is_completed: true,
        }
    }

    #[test]
    fn test_workflow_caches_vehicle_collections() {
        let workflow = Workflow::new(
            WorkflowInstanceId("wf-1".to_string()),
            vehicle(),
            empty_process(),
        );

        assert_eq!(workflow.vehicle_id, VehicleId("veh-9".to_string()));
        assert_eq!(workflow.vehicle_kind, VehicleKind::Truck);
        assert_eq!(workflow.files.len(), 1);
        assert!(workflow.images.is_empty());
    }

    #[test]
    fn test_workflow_serializes_without_snapshot() {
        let workflow = Workflow::new(
            WorkflowInstanceId("wf-1".to_string()),
            vehicle(),
            empty_process(),
        );

        let value = serde_json::to_value(&workflow).unwrap();
        assert!(value.get("vehicle").is_none());
        assert_eq!(value["vehicle_kind"], "truck");
        assert_eq!(value["process"]["display_name"], "Trade - Import");
    }
}
