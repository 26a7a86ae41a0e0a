//! Learning plan model definition and shape validation.

use std::collections::HashSet;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{DayStatus, LearningDay};
use crate::error::{LearnError, Result};

/// The aggregate root: a multi-day curriculum with ordered days and tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningPlan {
    /// Opaque unique identifier
    pub id: String,

    pub title: String,

    pub topic: String,

    /// Always equal to `days.len()`
    pub total_days: u32,

    /// Timestamp when the plan was generated (UTC)
    pub created_at: Timestamp,

    /// Free text supplied when the plan was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Days indexed by `day_number - 1`
    #[serde(default)]
    pub days: Vec<LearningDay>,

    /// Percentage of completed tasks, derived on save
    #[serde(default)]
    pub progress: u8,
}

impl LearningPlan {
    /// Returns the day with the given 1-based number.
    pub fn day(&self, day_number: u32) -> Option<&LearningDay> {
        let index = usize::try_from(day_number.checked_sub(1)?).ok()?;
        self.days.get(index).filter(|d| d.day_number == day_number)
    }

    pub(crate) fn day_index(&self, day_number: u32) -> Result<usize> {
        day_number
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .filter(|&i| self.days.get(i).is_some_and(|d| d.day_number == day_number))
            .ok_or_else(|| LearnError::DayNotFound {
                plan_id: self.id.clone(),
                day_number,
            })
    }

    /// Total number of tasks across every day.
    pub fn total_tasks(&self) -> usize {
        self.days.iter().map(|d| d.tasks.len()).sum()
    }

    /// Number of completed tasks across every day.
    pub fn completed_tasks(&self) -> usize {
        self.days.iter().map(LearningDay::completed_tasks).sum()
    }

    /// `round(100 * completed / total)` over the flattened task list, 0 when
    /// the plan has no tasks.
    pub fn computed_progress(&self) -> u8 {
        percent(self.completed_tasks(), self.total_tasks())
    }

    /// True when every day is closed and none is pending.
    pub fn is_finished(&self) -> bool {
        !self.days.is_empty() && self.days.iter().all(|d| d.status.is_closed())
    }

    /// Checks the structural shape of the plan: a non-blank id, contiguous
    /// 1-based day numbers in order, `total_days` matching the day count, and
    /// task ids unique within each day.
    pub fn validate_shape(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(LearnError::invalid_plan("plan id is empty"));
        }
        if usize::try_from(self.total_days).ok() != Some(self.days.len()) {
            return Err(LearnError::invalid_plan(format!(
                "totalDays is {} but the plan has {} days",
                self.total_days,
                self.days.len()
            )));
        }
        for (index, day) in self.days.iter().enumerate() {
            let expected = index + 1;
            if usize::try_from(day.day_number).ok() != Some(expected) {
                return Err(LearnError::invalid_plan(format!(
                    "day at position {expected} has dayNumber {}",
                    day.day_number
                )));
            }
            let mut seen = HashSet::new();
            for task in &day.tasks {
                if !seen.insert(task.id.as_str()) {
                    return Err(LearnError::invalid_plan(format!(
                        "duplicate task id '{}' in day {}",
                        task.id, day.day_number
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number of days in the given status.
    pub fn count_status(&self, status: DayStatus) -> usize {
        self.days.iter().filter(|d| d.status == status).count()
    }
}

/// Rounded percentage, half away from zero; 0 when `total` is 0.
pub(crate) fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * part + total) / (2 * total);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}
