//! Repository traits for the workflow engine.
//!
//! External crates implement these traits against their persistence
//! mechanism; the engine only depends on the contracts. Upsert atomicity on
//! finished-step rows is the repository's responsibility.

use async_trait::async_trait;

use super::finished_step::{FinishedStep, FinishedSteps};
use super::identity::{StepIdentity, WorkflowInstanceId};
use crate::error::WorkflowError;

/// Repository for finished-step rows
#[async_trait]
pub trait FinishedStepRepository: Send + Sync {
    /// Load the finished-step snapshot of one workflow instance
    async fn find_for_workflow(
        &self,
        id: &WorkflowInstanceId,
    ) -> Result<FinishedSteps, WorkflowError>;

    /// Insert or update the record for (workflow instance, step identity).
    ///
    /// Exactly one row exists per pair afterwards; a second call with the
    /// same pair replaces the stored date and additional value.
    async fn upsert(&self, record: FinishedStep) -> Result<FinishedStep, WorkflowError>;

    /// Remove the record for (workflow instance, step identity), if present
    async fn delete(
        &self,
        id: &WorkflowInstanceId,
        step: &StepIdentity,
    ) -> Result<(), WorkflowError>;
}

/// Memory implementations for testing
#[cfg(feature = "testing")]
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    type RecordKey = (String, String);

    /// In-memory implementation of the finished-step repository
    pub struct MemoryFinishedStepRepository {
        records: RwLock<HashMap<RecordKey, FinishedStep>>,
    }

    impl MemoryFinishedStepRepository {
        /// Create a new memory finished-step repository
        pub fn new() -> Self {
            Self {
                records: RwLock::new(HashMap::new()),
            }
        }

        fn key(id: &WorkflowInstanceId, step: &StepIdentity) -> RecordKey {
            (id.0.clone(), step.0.clone())
        }
    }

    impl Default for MemoryFinishedStepRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl FinishedStepRepository for MemoryFinishedStepRepository {
        async fn find_for_workflow(
            &self,
            id: &WorkflowInstanceId,
        ) -> Result<FinishedSteps, WorkflowError> {
            let records = self.records.read().map_err(|e| {
                WorkflowError::StateStoreError(format!("Failed to acquire read lock: {}", e))
            })?;

            let mut rows: Vec<FinishedStep> = records
                .values()
                .filter(|r| &r.workflow_instance_id == id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| a.finished_at.cmp(&b.finished_at));

            Ok(FinishedSteps::new(rows))
        }

        async fn upsert(&self, record: FinishedStep) -> Result<FinishedStep, WorkflowError> {
            let mut records = self.records.write().map_err(|e| {
                WorkflowError::StateStoreError(format!("Failed to acquire write lock: {}", e))
            })?;

            let key = Self::key(&record.workflow_instance_id, &record.step_identity);
            records.insert(key, record.clone());

            Ok(record)
        }

        async fn delete(
            &self,
            id: &WorkflowInstanceId,
            step: &StepIdentity,
        ) -> Result<(), WorkflowError> {
            let mut records = self.records.write().map_err(|e| {
                WorkflowError::StateStoreError(format!("Failed to acquire write lock: {}", e))
            })?;

            records.remove(&Self::key(id, step));

            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{TimeZone, Utc};

        fn record(instance: &str, step: &str, day: u32) -> FinishedStep {
            FinishedStep {
                workflow_instance_id: WorkflowInstanceId(instance.to_string()),
                step_identity: StepIdentity::new(step),
                finished_at: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
                additional_value: None,
            }
        }

        #[tokio::test]
        async fn test_upsert_replaces_existing_row() {
            let repo = MemoryFinishedStepRepository::new();
            let instance = WorkflowInstanceId("wf-1".to_string());

            repo.upsert(record("wf-1", "step-x", 10)).await.unwrap();
            repo.upsert(record("wf-1", "step-x", 20)).await.unwrap();

            let snapshot = repo.find_for_workflow(&instance).await.unwrap();
            assert_eq!(snapshot.len(), 1);
            let stored = snapshot.find(&StepIdentity::new("step-x")).unwrap();
            assert_eq!(stored.finished_at.format("%d/%m/%Y").to_string(), "20/01/2024");
        }

        #[tokio::test]
        async fn test_find_filters_by_instance() {
            let repo = MemoryFinishedStepRepository::new();

            repo.upsert(record("wf-1", "step-x", 10)).await.unwrap();
            repo.upsert(record("wf-2", "step-x", 11)).await.unwrap();

            let snapshot = repo
                .find_for_workflow(&WorkflowInstanceId("wf-1".to_string()))
                .await
                .unwrap();
            assert_eq!(snapshot.len(), 1);
        }

        #[tokio::test]
        async fn test_delete_removes_row() {
            let repo = MemoryFinishedStepRepository::new();
            let instance = WorkflowInstanceId("wf-1".to_string());

            repo.upsert(record("wf-1", "step-x", 10)).await.unwrap();
            repo.delete(&instance, &StepIdentity::new("step-x"))
                .await
                .unwrap();

            let snapshot = repo.find_for_workflow(&instance).await.unwrap();
            assert!(snapshot.is_empty());

            // Deleting a missing row is a no-op.
            repo.delete(&instance, &StepIdentity::new("step-x"))
                .await
                .unwrap();
        }
    }
}
