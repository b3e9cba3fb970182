use serde::{Deserialize, Serialize};

/// Value object: a derived anomaly signal on a step.
///
/// A red flag is independent of the step's completion state; it marks a
/// condition requiring attention (e.g. vehicle received but papers missing)
/// and drives external notification events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlag {
    /// Short name of the flag
    pub name: String,

    /// Human-readable description of the anomaly
    pub description: String,

    /// Whether the flag condition currently holds
    pub triggered: bool,
}

impl RedFlag {
    /// Create a new red flag
    pub fn new(name: impl Into<String>, description: impl Into<String>, triggered: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            triggered,
        }
    }
}
