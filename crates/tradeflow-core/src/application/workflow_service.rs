//! Assembling the workflow aggregate for one vehicle.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use super::DomainEventHandler;
use crate::domain::events::RedFlagRaised;
use crate::domain::identity::{ProcessIdentity, WorkflowInstanceId};
use crate::domain::process::Process;
use crate::domain::registry::ProcessRegistry;
use crate::domain::repository::FinishedStepRepository;
use crate::domain::vehicle::VehicleSnapshot;
use crate::domain::workflow::Workflow;
use crate::error::WorkflowError;

/// Service that builds the workflow aggregate: resolves the tenant's
/// process, loads the finished-step snapshot and materializes the tree.
///
/// Any failure aborts the whole computation; no partial tree is ever
/// returned or cached.
pub struct WorkflowService {
    registry: Arc<ProcessRegistry>,
    repository: Arc<dyn FinishedStepRepository>,
    event_handler: Arc<dyn DomainEventHandler>,
}

impl WorkflowService {
    /// Create the service with its collaborators
    pub fn new(
        registry: Arc<ProcessRegistry>,
        repository: Arc<dyn FinishedStepRepository>,
        event_handler: Arc<dyn DomainEventHandler>,
    ) -> Self {
        Self {
            registry,
            repository,
            event_handler,
        }
    }

    /// Build the workflow for one vehicle and process.
    ///
    /// Fails with [`WorkflowError::ValidationError`] when the vehicle's
    /// tenant has no definition wired for the requested process. Triggered
    /// red flags found in the materialized tree are reported through the
    /// event handler.
    pub async fn build_workflow(
        &self,
        instance_id: WorkflowInstanceId,
        vehicle: Arc<VehicleSnapshot>,
        process_identity: &ProcessIdentity,
    ) -> Result<Workflow, WorkflowError> {
        let spec = self
            .registry
            .resolve(&vehicle.tenant, process_identity)
            .ok_or_else(|| {
                WorkflowError::ValidationError(format!(
                    "Requirement not met to create workflow: tenant '{}' has no process '{}'",
                    vehicle.tenant.0, process_identity.0
                ))
            })?;

        let finished_steps = self.repository.find_for_workflow(&instance_id).await?;
        debug!(
            workflow_instance = %instance_id.0,
            vehicle = %vehicle.id.0,
            finished = finished_steps.len(),
            "Building workflow tree"
        );

        let process = Process::materialize(spec.as_ref(), &vehicle, &finished_steps)?;

        let flagged: Vec<_> = process
            .triggered_red_flags()
            .into_iter()
            .filter_map(|step| {
                step.red_flag
                    .clone()
                    .map(|flag| (step.identity.clone(), flag))
            })
            .collect();
        for (step_identity, red_flag) in flagged {
            warn!(
                workflow_instance = %instance_id.0,
                step = %step_identity.0,
                flag = %red_flag.name,
                "Red flag triggered"
            );
            self.event_handler
                .handle(Box::new(RedFlagRaised {
                    workflow_instance_id: instance_id.clone(),
                    step_identity,
                    red_flag,
                    timestamp: Utc::now(),
                }))
                .await?;
        }

        Ok(Workflow::new(instance_id, vehicle, process))
    }
}
