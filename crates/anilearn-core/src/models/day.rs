//! Learning day model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{DayStatus, Mood, Task};

/// One calendar unit of a learning plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningDay {
    /// 1-based position within the plan
    pub day_number: u32,

    pub topic: String,

    pub summary: String,

    /// Ordered tasks for the day
    #[serde(default)]
    pub tasks: Vec<Task>,

    pub status: DayStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,

    /// Set once, when the day is completed (UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

impl LearningDay {
    /// Returns the task with the given id.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Number of completed tasks.
    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed).count()
    }

    /// True when the day has tasks and every one is completed.
    pub fn all_tasks_completed(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|t| t.is_completed)
    }

    /// Sum of estimated minutes across completed tasks.
    pub fn completed_minutes(&self) -> u32 {
        self.tasks
            .iter()
            .filter(|t| t.is_completed)
            .map(|t| t.estimated_minutes)
            .sum()
    }
}
