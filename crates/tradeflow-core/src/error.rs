use thiserror::Error;

/// Core error type for the Tradeflow workflow engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// A process, subprocess, status or step definition is invalid.
    /// Raised at registration time; signals a programming error, not a
    /// runtime/data error.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failure while loading finished-step rows or vehicle capability data.
    /// Aborts tree construction; no partial workflow state is returned.
    #[error("Data access error: {0}")]
    DataAccessError(String),

    /// Domain rule violation surfaced to the caller for user-facing
    /// messaging (e.g. requirement not met to create a workflow).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Workflow instance not found
    #[error("Workflow not found: {0}")]
    WorkflowNotFound(String),

    /// State store error
    #[error("State store error: {0}")]
    StateStoreError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Event dispatch error
    #[error("Event dispatch error: {0}")]
    EventDispatchError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for WorkflowError {
    fn from(err: serde_json::Error) -> Self {
        WorkflowError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for WorkflowError {
    fn from(err: std::io::Error) -> Self {
        WorkflowError::DataAccessError(err.to_string())
    }
}

impl From<String> for WorkflowError {
    fn from(err: String) -> Self {
        WorkflowError::Other(err)
    }
}

impl From<&str> for WorkflowError {
    fn from(err: &str) -> Self {
        WorkflowError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors = vec![
            (
                WorkflowError::ConfigurationError("missing name".to_string()),
                "Configuration error: missing name",
            ),
            (
                WorkflowError::DataAccessError("connection reset".to_string()),
                "Data access error: connection reset",
            ),
            (
                WorkflowError::ValidationError("requirement not met".to_string()),
                "Validation error: requirement not met",
            ),
            (
                WorkflowError::WorkflowNotFound("wf-1".to_string()),
                "Workflow not found: wf-1",
            ),
            (
                WorkflowError::StateStoreError("lock poisoned".to_string()),
                "State store error: lock poisoned",
            ),
            (
                WorkflowError::SerializationError("bad json".to_string()),
                "Serialization error: bad json",
            ),
            (
                WorkflowError::EventDispatchError("handler closed".to_string()),
                "Event dispatch error: handler closed",
            ),
            (WorkflowError::Other("other".to_string()), "other"),
        ];

        for (error, expected_msg) in errors {
            assert_eq!(error.to_string(), expected_msg);
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error: WorkflowError = json_error.into();

        match error {
            WorkflowError::SerializationError(msg) => {
                assert!(msg.contains("expected value"));
            }
            _ => panic!("Expected SerializationError variant"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: WorkflowError = io_error.into();

        match error {
            WorkflowError::DataAccessError(msg) => {
                assert!(msg.contains("file not found"));
            }
            _ => panic!("Expected DataAccessError variant"),
        }
    }

    #[test]
    fn test_from_string_and_str() {
        let error: WorkflowError = "oops".into();
        assert_eq!(error, WorkflowError::Other("oops".to_string()));

        let error: WorkflowError = "oops".to_string().into();
        assert_eq!(error, WorkflowError::Other("oops".to_string()));
    }

    #[test]
    fn test_error_clone_and_eq() {
        let original = WorkflowError::ValidationError("test".to_string());
        let cloned = original.clone();

        assert_eq!(original, cloned);
    }
}
