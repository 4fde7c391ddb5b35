//! Task data model: onboarding action items shown to entrepreneurs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Introduction,
    Finance,
    Marketing,
    Sales,
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Introduction => write!(f, "Introduction"),
            Self::Finance => write!(f, "Finance"),
            Self::Marketing => write!(f, "Marketing"),
            Self::Sales => write!(f, "Sales"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Badge text shown on a task card.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "Urgent",
            Self::Medium => "Normal",
            Self::Low => "Optional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

/// A single onboarding task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Sequential within one generated list, starting at 1.
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    pub priority: Priority,
    /// Free text, e.g. "15 minutes".
    pub time_estimate: String,
    pub difficulty: String,
    /// Derived from the owner's completion log.
    #[serde(default)]
    pub status: TaskStatus,
}

/// One entry in an account's completion log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTask {
    pub id: u32,
    pub completed_at: DateTime<Utc>,
}
