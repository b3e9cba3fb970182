//! Recording step completions.
//!
//! Domain event handlers elsewhere in the application call this service when
//! a vehicle's business state changes (e.g. an expected-availability-date
//! field changes and the matching step auto-completes). The engine itself
//! never writes finished steps during tree construction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::DomainEventHandler;
use crate::domain::events::{FinishedStepRecorded, FinishedStepRemoved};
use crate::domain::finished_step::FinishedStep;
use crate::domain::identity::{StepIdentity, UserId, WorkflowInstanceId};
use crate::domain::repository::FinishedStepRepository;
use crate::error::WorkflowError;

/// Service that upserts finished-step records and emits the matching domain
/// events
pub struct FinishedStepService {
    repository: Arc<dyn FinishedStepRepository>,
    event_handler: Arc<dyn DomainEventHandler>,
}

impl FinishedStepService {
    /// Create the service with its collaborators
    pub fn new(
        repository: Arc<dyn FinishedStepRepository>,
        event_handler: Arc<dyn DomainEventHandler>,
    ) -> Self {
        Self {
            repository,
            event_handler,
        }
    }

    /// Insert or update the finished-step record for one step of one
    /// workflow instance.
    ///
    /// `finished_at` defaults to now when not given. The acting user is an
    /// explicit parameter and is carried on the emitted event.
    pub async fn record_step(
        &self,
        workflow_instance_id: &WorkflowInstanceId,
        step_identity: &StepIdentity,
        finished_at: Option<DateTime<Utc>>,
        additional_value: Option<String>,
        recorded_by: &UserId,
    ) -> Result<FinishedStep, WorkflowError> {
        let record = FinishedStep {
            workflow_instance_id: workflow_instance_id.clone(),
            step_identity: step_identity.clone(),
            finished_at: finished_at.unwrap_or_else(Utc::now),
            additional_value,
        };

        let stored = self.repository.upsert(record).await?;

        info!(
            workflow_instance = %workflow_instance_id.0,
            step = %step_identity.0,
            user = %recorded_by.0,
            "Recorded finished step"
        );

        self.event_handler
            .handle(Box::new(FinishedStepRecorded {
                workflow_instance_id: workflow_instance_id.clone(),
                step_identity: step_identity.clone(),
                finished_at: stored.finished_at,
                recorded_by: recorded_by.clone(),
                timestamp: Utc::now(),
            }))
            .await?;

        Ok(stored)
    }

    /// Remove the finished-step record for one step, reopening it
    pub async fn remove_step(
        &self,
        workflow_instance_id: &WorkflowInstanceId,
        step_identity: &StepIdentity,
        removed_by: &UserId,
    ) -> Result<(), WorkflowError> {
        self.repository
            .delete(workflow_instance_id, step_identity)
            .await?;

        info!(
            workflow_instance = %workflow_instance_id.0,
            step = %step_identity.0,
            user = %removed_by.0,
            "Removed finished step"
        );

        self.event_handler
            .handle(Box::new(FinishedStepRemoved {
                workflow_instance_id: workflow_instance_id.clone(),
                step_identity: step_identity.clone(),
                removed_by: removed_by.clone(),
                timestamp: Utc::now(),
            }))
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::NoopEventHandler;
    use crate::domain::events::DomainEvent;
    use crate::domain::repository::memory::MemoryFinishedStepRepository;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct RecordingEventHandler {
        event_types: Mutex<Vec<&'static str>>,
    }

    impl RecordingEventHandler {
        fn new() -> Self {
            Self {
                event_types: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DomainEventHandler for RecordingEventHandler {
        async fn handle(&self, event: Box<dyn DomainEvent>) -> Result<(), WorkflowError> {
            self.event_types.lock().unwrap().push(event.event_type());
            Ok(())
        }
    }

    fn instance() -> WorkflowInstanceId {
        WorkflowInstanceId("wf-1".to_string())
    }

    fn user() -> UserId {
        UserId("user-7".to_string())
    }

    #[tokio::test]
    async fn test_record_step_upserts_and_emits() {
        let repository = Arc::new(MemoryFinishedStepRepository::new());
        let handler = Arc::new(RecordingEventHandler::new());
        let service = FinishedStepService::new(repository.clone(), handler.clone());

        let first = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();

        service
            .record_step(&instance(), &StepIdentity::new("step-x"), Some(first), None, &user())
            .await
            .unwrap();
        service
            .record_step(&instance(), &StepIdentity::new("step-x"), Some(second), None, &user())
            .await
            .unwrap();

        // Exactly one row, reflecting the latest call.
        let snapshot = repository.find_for_workflow(&instance()).await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.find(&StepIdentity::new("step-x")).unwrap().finished_at,
            second
        );

        let events = handler.event_types.lock().unwrap();
        assert_eq!(
            *events,
            vec!["finished_step.recorded", "finished_step.recorded"]
        );
    }

    #[tokio::test]
    async fn test_record_step_defaults_to_now() {
        let repository = Arc::new(MemoryFinishedStepRepository::new());
        let service = FinishedStepService::new(repository, Arc::new(NoopEventHandler));

        let before = Utc::now();
        let stored = service
            .record_step(&instance(), &StepIdentity::new("step-x"), None, None, &user())
            .await
            .unwrap();

        assert!(stored.finished_at >= before);
        assert!(stored.finished_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_remove_step_deletes_and_emits() {
        let repository = Arc::new(MemoryFinishedStepRepository::new());
        let handler = Arc::new(RecordingEventHandler::new());
        let service = FinishedStepService::new(repository.clone(), handler.clone());

        service
            .record_step(&instance(), &StepIdentity::new("step-x"), None, None, &user())
            .await
            .unwrap();
        service
            .remove_step(&instance(), &StepIdentity::new("step-x"), &user())
            .await
            .unwrap();

        let snapshot = repository.find_for_workflow(&instance()).await.unwrap();
        assert!(snapshot.is_empty());

        let events = handler.event_types.lock().unwrap();
        assert_eq!(
            *events,
            vec!["finished_step.recorded", "finished_step.removed"]
        );
    }

    #[tokio::test]
    async fn test_additional_value_is_stored() {
        let repository = Arc::new(MemoryFinishedStepRepository::new());
        let service = FinishedStepService::new(repository.clone(), Arc::new(NoopEventHandler));

        service
            .record_step(
                &instance(),
                &StepIdentity::new("availability-date"),
                None,
                Some("CW 14".to_string()),
                &user(),
            )
            .await
            .unwrap();

        let snapshot = repository.find_for_workflow(&instance()).await.unwrap();
        let stored = snapshot.find(&StepIdentity::new("availability-date")).unwrap();
        assert_eq!(stored.additional_value.as_deref(), Some("CW 14"));
    }
}
