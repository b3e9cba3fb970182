//!
//! Tradeflow Core - workflow component engine for the Tradeflow platform
//!
//! This crate models a vehicle's trade lifecycle as a declarative,
//! recursively composed tree: Process → Subprocess → Status → Step. Step
//! completion is derived from persisted finished-step records; the tree is
//! rebuilt fresh for every read and handed to the presentation layer as a
//! serializable value. Step capabilities (files, images, red flags, URLs,
//! email content, disabling, extra payloads) are declared per definition
//! and dispatched explicitly during materialization.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - the component model, definitions and contracts
pub mod domain;

/// Application services - workflow assembly and finished-step recording
pub mod application;

/// Error types
pub mod error;

// Re-export key types
pub use error::WorkflowError;

pub use domain::events::DomainEvent;
pub use domain::finished_step::{FinishedStep, FinishedSteps};
pub use domain::identity::{
    ProcessIdentity, StatusIdentity, StepIdentity, SubprocessIdentity, TenantId, UserId,
    VehicleId, WorkflowInstanceId,
};
pub use domain::process::{Process, ProcessSpec};
pub use domain::red_flag::RedFlag;
pub use domain::registry::ProcessRegistry;
pub use domain::repository::FinishedStepRepository;
pub use domain::status::{Status, StatusSpec};
pub use domain::step::{Capability, EmailContent, Step, StepContext, StepSpec, DATE_FORMAT};
pub use domain::subprocess::{Subprocess, SubprocessSpec};
pub use domain::vehicle::{FileRef, ImageRef, VehicleKind, VehicleSnapshot};
pub use domain::workflow::Workflow;

// Application interfaces
pub use application::finished_step_service::FinishedStepService;
pub use application::workflow_service::WorkflowService;
pub use application::{DomainEventHandler, NoopEventHandler};
