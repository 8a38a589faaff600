use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Priority of a task. Variant order drives the list sort: `High` sorts
/// before `Medium`, which sorts before `Low`.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Parses user-supplied priority text, case-insensitively.
    /// Returns `None` for anything outside low/medium/high.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(label)
    }
}

/// A single to-do entry. The description is serialized under the wire
/// name `task`; `completed_at` is set exactly while `completed` is true.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    #[serde(rename = "task")]
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: u32, description: String, priority: Priority, due_date: Option<String>) -> Self {
        Self {
            id,
            description,
            completed: false,
            priority,
            created_at: Utc::now(),
            due_date,
            completed_at: None,
        }
    }
}

/// What an update does to a task's due date. Omitting the field keeps the
/// stored value; clearing is an explicit signal, not an empty string.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub enum DueDateUpdate {
    #[default]
    Keep,
    Set(String),
    Clear,
}
