//! Domain layer: the workflow component model and its contracts.
//!
//! The model is a declarative, recursively composed tree: a process is an
//! ordered list of subprocesses, a subprocess an ordered list of statuses,
//! a status an ordered list of steps. Definitions (`*Spec` traits) are fixed
//! at startup and validated on registration; the runtime tree is rebuilt
//! fresh for every read from the finished-step snapshot.

/// Identity value objects
pub mod identity;

/// Domain events
pub mod events;

/// Persisted finished-step records and their snapshot
pub mod finished_step;

/// Process definitions and materialized processes
pub mod process;

/// Red flag value object
pub mod red_flag;

/// Tenant process registry
pub mod registry;

/// Repository traits
pub mod repository;

/// Status definitions and materialized statuses
pub mod status;

/// Step definitions, capabilities, and materialized steps
pub mod step;

/// Subprocess definitions and materialized subprocesses
pub mod subprocess;

/// Vehicle read model
pub mod vehicle;

/// Workflow aggregate
pub mod workflow;
