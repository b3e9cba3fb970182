//! Process: the tenant-specific composition root of a trade flow.

use std::sync::Arc;

use serde::Serialize;

use super::finished_step::FinishedSteps;
use super::identity::ProcessIdentity;
use super::step::Step;
use super::subprocess::{Subprocess, SubprocessSpec};
use super::vehicle::VehicleSnapshot;
use crate::error::WorkflowError;

/// Declarative definition of a process.
///
/// Distinct tenants assemble different subprocess sets and orderings for
/// conceptually similar trade flows; the process definition is where that
/// composition lives. Definitions are resolved through the
/// [`ProcessRegistry`](crate::domain::registry::ProcessRegistry), never
/// through dynamic type names.
pub trait ProcessSpec: Send + Sync {
    /// Stable identity of the process (one per conceptual trade type)
    fn identity(&self) -> ProcessIdentity;

    /// Human-readable name shown in the workflow header
    fn display_name(&self) -> &str;

    /// The ordered subprocess definitions of this process
    fn subprocesses(&self) -> &[Arc<dyn SubprocessSpec>];
}

/// Materialized runtime process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Process {
    /// Stable identity of the process
    pub identity: ProcessIdentity,

    /// Human-readable name
    pub display_name: String,

    /// Materialized subprocesses, in declaration order
    pub subprocesses: Vec<Subprocess>,

    /// Whether every contained subprocess is completed
    pub is_completed: bool,
}

impl Process {
    /// Build the runtime process for one definition.
    ///
    /// The whole tree is built serially within one request; the finished
    /// steps and the vehicle snapshot are treated as immutable for the
    /// duration of construction.
    pub fn materialize(
        spec: &dyn ProcessSpec,
        vehicle: &VehicleSnapshot,
        finished_steps: &FinishedSteps,
    ) -> Result<Process, WorkflowError> {
        let subprocesses = spec
            .subprocesses()
            .iter()
            .map(|subprocess| Subprocess::materialize(subprocess.as_ref(), vehicle, finished_steps))
            .collect::<Result<Vec<_>, _>>()?;

        let is_completed = subprocesses.iter().all(|s| s.is_completed);

        Ok(Process {
            identity: spec.identity(),
            display_name: spec.display_name().to_string(),
            subprocesses,
            is_completed,
        })
    }

    /// Iterate over every materialized step in the tree, in declaration
    /// order
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.subprocesses
            .iter()
            .flat_map(|sp| sp.statuses.iter())
            .flat_map(|st| st.steps.iter())
    }

    /// Steps whose red flag is currently triggered
    pub fn triggered_red_flags(&self) -> Vec<&Step> {
        self.steps()
            .filter(|s| s.red_flag.as_ref().is_some_and(|f| f.triggered))
            .collect()
    }
}
