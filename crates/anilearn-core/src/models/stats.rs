//! Progress dashboard statistics derived from a plan.

use serde::Serialize;

use super::{plan::percent, DayStatus, LearningPlan};

/// How many upcoming days the dashboard lists.
const UPCOMING_LIMIT: usize = 3;

/// One row of the per-day progress chart.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayProgress {
    pub day_number: u32,
    pub topic: String,
    pub completed: bool,
    pub completed_tasks: usize,
    pub total_tasks: usize,
}

/// Aggregated statistics for the progress dashboard.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub plan_title: String,
    /// Share of days completed (0-100)
    pub completion_percent: u8,
    pub completed_days: usize,
    pub total_days: usize,
    /// Estimated minutes of completed tasks
    pub minutes_invested: u32,
    pub days: Vec<DayProgress>,
    /// Next days that are not yet completed, in order
    pub upcoming: Vec<DayProgress>,
}

impl DashboardStats {
    pub fn from_plan(plan: &LearningPlan) -> Self {
        let days: Vec<DayProgress> = plan
            .days
            .iter()
            .map(|day| DayProgress {
                day_number: day.day_number,
                topic: day.topic.clone(),
                completed: day.status == DayStatus::Completed,
                completed_tasks: day.completed_tasks(),
                total_tasks: day.tasks.len(),
            })
            .collect();
        let completed_days = plan.count_status(DayStatus::Completed);
        let upcoming = days
            .iter()
            .filter(|d| !d.completed)
            .take(UPCOMING_LIMIT)
            .cloned()
            .collect();

        Self {
            plan_title: plan.title.clone(),
            completion_percent: percent(completed_days, plan.days.len()),
            completed_days,
            total_days: plan.days.len(),
            minutes_invested: plan.days.iter().map(|d| d.completed_minutes()).sum(),
            days,
            upcoming,
        }
    }

    /// Hours invested, rounded down to one decimal place.
    pub fn hours_invested(&self) -> f64 {
        f64::from(self.minutes_invested / 6) / 10.0
    }
}
