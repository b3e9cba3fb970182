//! Status: an ordered group of steps representing one sub-phase.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::finished_step::FinishedSteps;
use super::identity::StatusIdentity;
use super::step::{Step, StepSpec, DATE_FORMAT};
use super::vehicle::VehicleSnapshot;
use crate::error::WorkflowError;

/// Declarative definition of a status: a fixed, ordered list of steps
pub trait StatusSpec: Send + Sync {
    /// Stable identity of the status
    fn identity(&self) -> StatusIdentity;

    /// Human-readable name shown in the workflow tree
    fn display_name(&self) -> &str;

    /// The ordered step definitions of this status
    fn steps(&self) -> &[Arc<dyn StepSpec>];
}

/// Materialized runtime status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    /// Stable identity of the status
    pub identity: StatusIdentity,

    /// Human-readable name
    pub display_name: String,

    /// Materialized steps, in declaration order
    pub steps: Vec<Step>,

    /// Whether every contained step is completed
    pub is_completed: bool,

    /// Latest step finish date, formatted `dd/mm/yyyy`; `None` when no step
    /// has finished
    pub summary: Option<String>,
}

impl Status {
    /// Build the runtime status for one definition.
    ///
    /// Every step is materialized even when an earlier one is incomplete;
    /// the step fields are needed for display regardless of aggregate
    /// completion. The materialized step collection is the single source of
    /// truth for `is_completed` and `summary`.
    pub fn materialize(
        spec: &dyn StatusSpec,
        vehicle: &VehicleSnapshot,
        finished_steps: &FinishedSteps,
    ) -> Result<Status, WorkflowError> {
        let steps = spec
            .steps()
            .iter()
            .map(|step| Step::materialize(step.as_ref(), vehicle, finished_steps))
            .collect::<Result<Vec<_>, _>>()?;

        let is_completed = steps.iter().all(|s| s.is_completed);
        let latest: Option<DateTime<Utc>> = steps.iter().filter_map(|s| s.date_finished).max();

        Ok(Status {
            identity: spec.identity(),
            display_name: spec.display_name().to_string(),
            steps,
            is_completed,
            summary: latest.map(|d| d.format(DATE_FORMAT).to_string()),
        })
    }
}
