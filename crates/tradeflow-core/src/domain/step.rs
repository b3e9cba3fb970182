//! Step definitions and their materialized runtime form.
//!
//! A [`StepSpec`] is the declarative side: a stable identity, display
//! metadata and the capability set the step opts into. A [`Step`] is the
//! transient runtime value built fresh for every read, deriving its
//! completion state from the finished-step snapshot and its capability
//! payloads from the vehicle snapshot. Steps are never mutated after
//! construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::finished_step::{FinishedStep, FinishedSteps};
use super::identity::StepIdentity;
use super::red_flag::RedFlag;
use super::vehicle::{FileRef, ImageRef, VehicleSnapshot};
use crate::error::WorkflowError;

/// Display format for completion dates
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Capabilities a step may opt into.
///
/// The set is declared on the definition, and the builder dispatches on the
/// declared set only; no runtime probing of the definition takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Step exposes a file collection queried from the vehicle
    Files,
    /// Step exposes an image collection queried from the vehicle
    Images,
    /// Step derives a red flag from live vehicle state
    RedFlag,
    /// Step computes a route/URL for the UI
    Url,
    /// Step provides prefilled email content
    Email,
    /// Step can be disabled by a rule over vehicle state
    Disableable,
    /// Step carries an arbitrary structured payload for UI rendering
    ComponentData,
}

/// Prefilled email content exposed by steps with the [`Capability::Email`]
/// capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContent {
    /// Recipient address
    pub recipient: String,

    /// Subject line
    pub subject: String,

    /// Body template text
    pub template_text: String,
}

/// Read-only context handed to step computations during materialization
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Vehicle snapshot the workflow tracks
    pub vehicle: &'a VehicleSnapshot,

    /// The step's finished-step record, when one exists
    pub finished: Option<&'a FinishedStep>,
}

/// Declarative definition of a workflow step.
///
/// Implementations must return a stable, non-empty identity; it is the
/// persistence key for finished-step rows. Capability computations are only
/// invoked for capabilities named in [`StepSpec::capabilities`], and any
/// error they return aborts tree construction.
pub trait StepSpec: Send + Sync {
    /// Stable identity of the step
    fn identity(&self) -> StepIdentity;

    /// Human-readable name shown in the workflow tree
    fn display_name(&self) -> &str;

    /// Whether the UI should offer a one-click "mark finished today" action
    fn has_quick_date_finish(&self) -> bool {
        false
    }

    /// Name of the UI component rendered for manual completion, if any
    fn modal_component(&self) -> Option<&str> {
        None
    }

    /// The capability set this step opts into
    fn capabilities(&self) -> &[Capability] {
        &[]
    }

    /// Completion summary shown next to the step.
    ///
    /// Defaults to the finish date formatted as `dd/mm/yyyy`; steps that
    /// store an additional value can override this to render it instead.
    fn summary(&self, finished: Option<&FinishedStep>) -> Option<String> {
        finished.map(|f| f.finished_at.format(DATE_FORMAT).to_string())
    }

    /// Files exposed by this step ([`Capability::Files`])
    fn files(&self, _ctx: &StepContext<'_>) -> Result<Vec<FileRef>, WorkflowError> {
        Ok(Vec::new())
    }

    /// Images exposed by this step ([`Capability::Images`])
    fn images(&self, _ctx: &StepContext<'_>) -> Result<Vec<ImageRef>, WorkflowError> {
        Ok(Vec::new())
    }

    /// Red flag derived from live vehicle state ([`Capability::RedFlag`])
    fn red_flag(&self, _ctx: &StepContext<'_>) -> Result<Option<RedFlag>, WorkflowError> {
        Ok(None)
    }

    /// Route computed for the UI ([`Capability::Url`])
    fn url(&self, _ctx: &StepContext<'_>) -> Result<Option<String>, WorkflowError> {
        Ok(None)
    }

    /// Prefilled email content ([`Capability::Email`])
    fn email(&self, _ctx: &StepContext<'_>) -> Result<Option<EmailContent>, WorkflowError> {
        Ok(None)
    }

    /// Disable rule over vehicle state ([`Capability::Disableable`])
    fn is_disabled(&self, _ctx: &StepContext<'_>) -> Result<bool, WorkflowError> {
        Ok(false)
    }

    /// Arbitrary structured payload for UI rendering
    /// ([`Capability::ComponentData`])
    fn component_data(
        &self,
        _ctx: &StepContext<'_>,
    ) -> Result<Option<serde_json::Value>, WorkflowError> {
        Ok(None)
    }
}

/// Materialized runtime step, rebuilt on every read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// Stable identity of the step
    pub identity: StepIdentity,

    /// Human-readable name
    pub display_name: String,

    /// Whether a finished-step record exists for this step
    pub is_completed: bool,

    /// When the step was finished, if it was
    pub date_finished: Option<DateTime<Utc>>,

    /// Completion summary (formatted date or step-specific value)
    pub summary: Option<String>,

    /// UI hint: offer one-click completion with today's date
    pub has_quick_date_finish: bool,

    /// UI component rendered for manual completion
    pub modal_component: Option<String>,

    /// Files payload, present iff the Files capability is declared
    pub files: Option<Vec<FileRef>>,

    /// Images payload, present iff the Images capability is declared
    pub images: Option<Vec<ImageRef>>,

    /// Red flag payload, present iff the RedFlag capability is declared and
    /// the rule produced a flag
    pub red_flag: Option<RedFlag>,

    /// URL payload, present iff the Url capability is declared
    pub url: Option<String>,

    /// Email payload, present iff the Email capability is declared
    pub email: Option<EmailContent>,

    /// Whether the step is disabled for this vehicle
    pub is_disabled: bool,

    /// Structured payload for UI rendering
    pub component_data: Option<serde_json::Value>,
}

impl Step {
    /// Build the runtime step for one definition against the loaded
    /// snapshots.
    ///
    /// Field resolution order is fixed: the finished-step record first, then
    /// completion, finish date and summary derived from it, then capability
    /// payloads in declared-set order. Any capability error aborts the whole
    /// construction.
    pub fn materialize(
        spec: &dyn StepSpec,
        vehicle: &VehicleSnapshot,
        finished_steps: &FinishedSteps,
    ) -> Result<Step, WorkflowError> {
        let identity = spec.identity();
        let finished = finished_steps.find(&identity);
        let ctx = StepContext { vehicle, finished };

        let mut step = Step {
            identity,
            display_name: spec.display_name().to_string(),
            is_completed: finished.is_some(),
            date_finished: finished.map(|f| f.finished_at),
            summary: spec.summary(finished),
            has_quick_date_finish: spec.has_quick_date_finish(),
            modal_component: spec.modal_component().map(str::to_string),
            files: None,
            images: None,
            red_flag: None,
            url: None,
            email: None,
            is_disabled: false,
            component_data: None,
        };

        for capability in spec.capabilities() {
            match capability {
                Capability::Files => step.files = Some(spec.files(&ctx)?),
                Capability::Images => step.images = Some(spec.images(&ctx)?),
                Capability::RedFlag => step.red_flag = spec.red_flag(&ctx)?,
                Capability::Url => step.url = spec.url(&ctx)?,
                Capability::Email => step.email = spec.email(&ctx)?,
                Capability::Disableable => step.is_disabled = spec.is_disabled(&ctx)?,
                Capability::ComponentData => step.component_data = spec.component_data(&ctx)?,
            }
        }

        Ok(step)
    }
}
