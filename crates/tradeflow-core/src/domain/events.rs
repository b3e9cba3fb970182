//! Domain events emitted around finished-step writes and red flags.
//!
//! The engine itself performs no side effects; the application services
//! record these events and hand them to an external handler (notifications,
//! audit trail). The acting user is always carried explicitly on the event.

use chrono::{DateTime, Utc};
use std::fmt::Debug;

use super::identity::{StepIdentity, UserId, WorkflowInstanceId};
use super::red_flag::RedFlag;

/// Domain event trait for all events in the engine
pub trait DomainEvent: Debug + Send + Sync {
    /// Returns the type of the event as a string
    fn event_type(&self) -> &'static str;

    /// Returns the workflow instance this event is associated with
    fn workflow_instance_id(&self) -> &WorkflowInstanceId;

    /// Returns the timestamp when the event occurred
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Event: a finished-step record was inserted or updated
#[derive(Debug)]
pub struct FinishedStepRecorded {
    /// The workflow instance the record belongs to
    pub workflow_instance_id: WorkflowInstanceId,

    /// Identity of the finished step
    pub step_identity: StepIdentity,

    /// The finish date that was stored
    pub finished_at: DateTime<Utc>,

    /// The user who recorded the completion
    pub recorded_by: UserId,

    /// The timestamp when the event occurred
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for FinishedStepRecorded {
    fn event_type(&self) -> &'static str {
        "finished_step.recorded"
    }

    fn workflow_instance_id(&self) -> &WorkflowInstanceId {
        &self.workflow_instance_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Event: a finished-step record was removed
#[derive(Debug)]
pub struct FinishedStepRemoved {
    /// The workflow instance the record belonged to
    pub workflow_instance_id: WorkflowInstanceId,

    /// Identity of the step whose record was removed
    pub step_identity: StepIdentity,

    /// The user who removed the completion
    pub removed_by: UserId,

    /// The timestamp when the event occurred
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for FinishedStepRemoved {
    fn event_type(&self) -> &'static str {
        "finished_step.removed"
    }

    fn workflow_instance_id(&self) -> &WorkflowInstanceId {
        &self.workflow_instance_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Event: a step reported a triggered red flag during tree construction
#[derive(Debug)]
pub struct RedFlagRaised {
    /// The workflow instance the flag was raised on
    pub workflow_instance_id: WorkflowInstanceId,

    /// Identity of the step that raised the flag
    pub step_identity: StepIdentity,

    /// The flag itself
    pub red_flag: RedFlag,

    /// The timestamp when the event occurred
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for RedFlagRaised {
    fn event_type(&self) -> &'static str {
        "red_flag.raised"
    }

    fn workflow_instance_id(&self) -> &WorkflowInstanceId {
        &self.workflow_instance_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
