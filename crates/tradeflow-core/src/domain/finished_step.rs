//! Persisted completion markers for workflow steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::{StepIdentity, WorkflowInstanceId};

/// Persisted record marking a step as done for one workflow instance.
///
/// At most one record exists per (workflow instance, step identity) pair;
/// the repository enforces upsert semantics on writes. The engine only ever
/// reads these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedStep {
    /// Workflow instance the record belongs to
    pub workflow_instance_id: WorkflowInstanceId,

    /// Identity of the finished step
    pub step_identity: StepIdentity,

    /// When the step was finished
    pub finished_at: DateTime<Utc>,

    /// Optional extra value stored alongside the completion (e.g. an
    /// expected availability date rendered by a custom step summary)
    pub additional_value: Option<String>,
}

/// The finished-step rows of one workflow instance, loaded up front and
/// treated as an immutable snapshot during tree construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinishedSteps {
    records: Vec<FinishedStep>,
}

impl FinishedSteps {
    /// Build a snapshot from loaded rows.
    ///
    /// Later rows for the same step identity replace earlier ones, mirroring
    /// the upsert invariant of the persistence layer.
    pub fn new(records: Vec<FinishedStep>) -> Self {
        let mut snapshot = Self::default();
        for record in records {
            snapshot.put(record);
        }
        snapshot
    }

    /// Insert or replace the record for a step identity
    pub fn put(&mut self, record: FinishedStep) {
        match self
            .records
            .iter_mut()
            .find(|r| r.step_identity == record.step_identity)
        {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    /// Find the record for a step identity
    pub fn find(&self, identity: &StepIdentity) -> Option<&FinishedStep> {
        self.records.iter().find(|r| &r.step_identity == identity)
    }

    /// Whether a record exists for the step identity
    pub fn contains(&self, identity: &StepIdentity) -> bool {
        self.find(identity).is_some()
    }

    /// Iterate over all records
    pub fn iter(&self) -> impl Iterator<Item = &FinishedStep> {
        self.records.iter()
    }

    /// Number of records in the snapshot
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(step: &str, day: u32) -> FinishedStep {
        FinishedStep {
            workflow_instance_id: WorkflowInstanceId("wf-1".to_string()),
            step_identity: StepIdentity::new(step),
            finished_at: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
            additional_value: None,
        }
    }

    #[test]
    fn test_find_and_contains() {
        let snapshot = FinishedSteps::new(vec![record("step-x", 10), record("step-y", 12)]);

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains(&StepIdentity::new("step-x")));
        assert!(!snapshot.contains(&StepIdentity::new("step-z")));

        let found = snapshot.find(&StepIdentity::new("step-y")).unwrap();
        assert_eq!(found.finished_at.format("%d/%m/%Y").to_string(), "12/01/2024");
    }

    #[test]
    fn test_later_rows_replace_earlier_ones() {
        let snapshot = FinishedSteps::new(vec![record("step-x", 10), record("step-x", 20)]);

        assert_eq!(snapshot.len(), 1);
        let found = snapshot.find(&StepIdentity::new("step-x")).unwrap();
        assert_eq!(found.finished_at.format("%d/%m/%Y").to_string(), "20/01/2024");
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = FinishedSteps::default();
        assert!(snapshot.is_empty());
        assert!(snapshot.find(&StepIdentity::new("anything")).is_none());
    }
}
