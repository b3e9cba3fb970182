//! Application services: the orchestration around the domain model.

use async_trait::async_trait;

use crate::domain::events::DomainEvent;
use crate::error::WorkflowError;

/// Finished-step recording service
pub mod finished_step_service;

/// Workflow assembly service
pub mod workflow_service;

/// Handler invoked for every domain event the services emit.
///
/// Implementations route events to notifications, audit trails or message
/// buses. Handler errors propagate to the caller; the services never swallow
/// them.
#[async_trait]
pub trait DomainEventHandler: Send + Sync {
    /// Handle a single domain event
    async fn handle(&self, event: Box<dyn DomainEvent>) -> Result<(), WorkflowError>;
}

/// Event handler that drops all events, for wiring tests and callers that
/// do not care about side effects
#[derive(Debug, Default)]
pub struct NoopEventHandler;

#[async_trait]
impl DomainEventHandler for NoopEventHandler {
    async fn handle(&self, _event: Box<dyn DomainEvent>) -> Result<(), WorkflowError> {
        Ok(())
    }
}
