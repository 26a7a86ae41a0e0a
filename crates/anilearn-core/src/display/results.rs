//! Result wrapper types for displaying operation outcomes.
//!
//! Wrappers pair a resource with the message that describes what just
//! happened to it, so every command reports in the same shape.

use std::fmt;

use crate::{
    models::{Evaluation, LearningDay, LearningPlan, LearningPlanMetadata, Task},
    progression::current_day,
};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use anilearn_core::{display::CreateResult, models::LearningPlan};
/// use jiff::Timestamp;
///
/// let plan = LearningPlan {
///     id: "4f1c".to_string(),
///     title: "Rust".to_string(),
///     topic: "Rust".to_string(),
///     total_days: 0,
///     created_at: Timestamp::now(),
///     context: None,
///     days: vec![],
///     progress: 0,
/// };
///
/// let output = CreateResult::new(plan).to_string();
/// assert!(output.starts_with("Created plan with ID: 4f1c"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<LearningPlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with the
/// list of fields that changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for UpdateResult<LearningDay> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated day {}", self.resource.day_number)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<LearningPlanMetadata> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {})",
            self.resource.title, self.resource.id
        )
    }
}

/// Outcome of completing a day: the updated plan and the day just closed.
pub struct CompletionResult {
    pub plan: LearningPlan,
    pub day_number: u32,
}

impl CompletionResult {
    pub fn new(plan: LearningPlan, day_number: u32) -> Self {
        Self { plan, day_number }
    }
}

impl fmt::Display for CompletionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Completed day {} of '{}' ({}% done)",
            self.day_number, self.plan.title, self.plan.progress
        )?;
        writeln!(f)?;
        match current_day(&self.plan) {
            Some(next) if next.day_number != self.day_number && !next.status.is_closed() => {
                writeln!(f, "Day {} unlocked: {}", next.day_number, next.topic)
            }
            _ => writeln!(f, "Plan finished. Well done!"),
        }
    }
}

/// Outcome of answering a task's verification question.
pub struct AnswerResult {
    pub task: Task,
    pub evaluation: Evaluation,
}

impl AnswerResult {
    pub fn new(task: Task, evaluation: Evaluation) -> Self {
        Self { task, evaluation }
    }
}

impl fmt::Display for AnswerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.evaluation)?;
        writeln!(f)?;
        write!(f, "{}", self.task)
    }
}
