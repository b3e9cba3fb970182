//! Subprocess: an ordered group of statuses representing one major phase.

use std::sync::Arc;

use serde::Serialize;

use super::finished_step::FinishedSteps;
use super::identity::SubprocessIdentity;
use super::status::{Status, StatusSpec};
use super::vehicle::VehicleSnapshot;
use crate::error::WorkflowError;

/// Declarative definition of a subprocess: a fixed, ordered list of statuses
/// plus an opaque UI icon/component identifier
pub trait SubprocessSpec: Send + Sync {
    /// Stable identity of the subprocess
    fn identity(&self) -> SubprocessIdentity;

    /// Human-readable name shown in the workflow tree
    fn display_name(&self) -> &str;

    /// Identifier of the UI component/icon rendered for this phase.
    /// Treated as an opaque external reference.
    fn icon_component(&self) -> &str;

    /// The ordered status definitions of this subprocess
    fn statuses(&self) -> &[Arc<dyn StatusSpec>];
}

/// Materialized runtime subprocess
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subprocess {
    /// Stable identity of the subprocess
    pub identity: SubprocessIdentity,

    /// Human-readable name
    pub display_name: String,

    /// Opaque UI icon/component identifier
    pub icon_component: String,

    /// Materialized statuses, in declaration order
    pub statuses: Vec<Status>,

    /// Whether every contained status is completed
    pub is_completed: bool,
}

impl Subprocess {
    /// Build the runtime subprocess for one definition
    pub fn materialize(
        spec: &dyn SubprocessSpec,
        vehicle: &VehicleSnapshot,
        finished_steps: &FinishedSteps,
    ) -> Result<Subprocess, WorkflowError> {
        let statuses = spec
            .statuses()
            .iter()
            .map(|status| Status::materialize(status.as_ref(), vehicle, finished_steps))
            .collect::<Result<Vec<_>, _>>()?;

        let is_completed = statuses.iter().all(|s| s.is_completed);

        Ok(Subprocess {
            identity: spec.identity(),
            display_name: spec.display_name().to_string(),
            icon_component: spec.icon_component().to_string(),
            statuses,
            is_completed,
        })
    }
}
