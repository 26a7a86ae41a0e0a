//! Day and task state transitions for a learning plan.
//!
//! Every function here is pure: it takes a plan (or task) snapshot and
//! returns a new value, leaving the input untouched. Persisting the result
//! is the caller's job, through [`crate::repository::PlanRepository::save`].
//!
//! # Day lifecycle
//!
//! ```text
//! LOCKED ──▶ PENDING ──▶ COMPLETED
//! ```
//!
//! While a plan is unfinished exactly one day is `PENDING`; every earlier day
//! is closed (`COMPLETED` or `SKIPPED`) and every later day is `LOCKED`.
//! [`complete_day`] is the only transition that moves the pending pointer,
//! and it only moves forward.

use jiff::Timestamp;
use log::info;

use crate::{
    error::{LearnError, Result},
    models::{
        plan::percent, DayStatus, Evaluation, LearningDay, LearningPlan, Task, UpdateDayRequest,
    },
};

#[cfg(test)]
mod tests;

/// Returns the pending day, or the last day once the plan is finished.
///
/// Returns `None` only for a plan without days.
pub fn current_day(plan: &LearningPlan) -> Option<&LearningDay> {
    plan.days
        .iter()
        .find(|d| d.status == DayStatus::Pending)
        .or_else(|| plan.days.last())
}

/// Checks that the tasks of day `day_number` may change.
///
/// Only the pending day is open. Locked days wait for the unlock chain and
/// closed days keep the tasks they were completed with.
///
/// # Errors
///
/// - `LearnError::DayNotFound` when the day does not exist
/// - `LearnError::Precondition` when the day is not `PENDING`
pub fn ensure_day_open(plan: &LearningPlan, day_number: u32) -> Result<()> {
    let day = &plan.days[plan.day_index(day_number)?];
    match day.status {
        DayStatus::Pending => Ok(()),
        DayStatus::Locked => Err(LearnError::precondition(format!(
            "day {day_number} is locked; finish the current day first"
        ))),
        DayStatus::Completed | DayStatus::Skipped => Err(LearnError::precondition(format!(
            "day {day_number} is already closed"
        ))),
    }
}

/// Replaces the task with `task.id` inside day `day_number`.
///
/// Day statuses are left as they are.
///
/// # Errors
///
/// - `LearnError::DayNotFound` / `LearnError::TaskNotFound` when the target
///   does not exist
/// - `LearnError::Precondition` when the task is marked complete while its
///   verification question is still unanswered
pub fn update_task(plan: &LearningPlan, day_number: u32, task: Task) -> Result<LearningPlan> {
    if !task.completion_allowed() {
        return Err(LearnError::precondition(format!(
            "task '{}' must be verified before it can be completed",
            task.id
        )));
    }

    let index = plan.day_index(day_number)?;
    let mut updated = plan.clone();
    let slot = updated.days[index]
        .tasks
        .iter_mut()
        .find(|t| t.id == task.id)
        .ok_or_else(|| LearnError::TaskNotFound {
            day_number,
            task_id: task.id.clone(),
        })?;
    *slot = task;
    Ok(updated)
}

/// Applies edits to day `day_number`, keeping its status and completion date.
pub fn update_day(
    plan: &LearningPlan,
    day_number: u32,
    request: &UpdateDayRequest,
) -> Result<LearningPlan> {
    let index = plan.day_index(day_number)?;
    let mut updated = plan.clone();
    request.apply_to(&mut updated.days[index]);
    Ok(updated)
}

/// Flips a task's completion flag by hand.
///
/// # Errors
///
/// Returns `LearnError::Precondition` when completing a gated task that has
/// not been verified. Un-completing is always allowed.
pub fn toggle_task(task: &Task) -> Result<Task> {
    let mut toggled = task.clone();
    toggled.is_completed = !task.is_completed;
    if !toggled.completion_allowed() {
        return Err(LearnError::precondition(format!(
            "answer the verification question of task '{}' first",
            task.id
        )));
    }
    Ok(toggled)
}

/// Records a learner's answer together with an explicit verdict.
///
/// The task becomes verified and is completed exactly when the verdict says
/// the answer is correct. Feedback from an earlier attempt is replaced; a
/// verdict without feedback clears it.
pub fn record_answer(task: &Task, user_answer: &str, evaluation: &Evaluation) -> Task {
    let mut answered = task.clone();
    answered.user_answer = user_answer.to_string();
    answered.is_verified = true;
    answered.ai_feedback = Some(evaluation.feedback.trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string);
    answered.is_completed = evaluation.correct;
    answered
}

/// Completes the pending day and unlocks the next one, stamping `now` as
/// the completion date.
///
/// After the last day is completed the plan has no pending day.
///
/// # Errors
///
/// - `LearnError::InvalidPlan` for a plan without days, or when the current
///   day has no tasks
/// - `LearnError::Precondition` when the plan is already finished or any
///   task of the current day is incomplete
pub fn complete_day_at(plan: &LearningPlan, now: Timestamp) -> Result<LearningPlan> {
    let current = current_day(plan).ok_or_else(|| LearnError::invalid_plan("plan has no days"))?;
    if current.tasks.is_empty() {
        return Err(LearnError::invalid_plan(format!(
            "day {} has no tasks",
            current.day_number
        )));
    }
    if current.status != DayStatus::Pending {
        return Err(LearnError::precondition("every day of this plan is already closed"));
    }

    let incomplete: Vec<&str> = current
        .tasks
        .iter()
        .filter(|t| !t.is_completed)
        .map(|t| t.id.as_str())
        .collect();
    if !incomplete.is_empty() {
        return Err(LearnError::precondition(format!(
            "day {} has incomplete tasks: {}",
            current.day_number,
            incomplete.join(", ")
        )));
    }

    let index = plan.day_index(current.day_number)?;
    let mut updated = plan.clone();
    let day = &mut updated.days[index];
    day.status = DayStatus::Completed;
    day.completion_date = Some(now);

    match updated.days.get_mut(index + 1) {
        Some(next) => next.status = DayStatus::Pending,
        None => info!("Plan {} finished", plan.id),
    }
    Ok(updated)
}

/// Completes the pending day at the current time. See [`complete_day_at`].
pub fn complete_day(plan: &LearningPlan) -> Result<LearningPlan> {
    complete_day_at(plan, Timestamp::now())
}

/// Share of completed tasks within one day (0-100).
pub fn day_progress(day: &LearningDay) -> u8 {
    percent(day.completed_tasks(), day.tasks.len())
}

/// True once the day can be completed.
pub fn can_complete(day: &LearningDay) -> bool {
    day.status == DayStatus::Pending && day.all_tasks_completed()
}

/// Checks the unlock-chain invariant: at most one pending day, closed days
/// before it, locked days after it, and no pending day once every day is
/// completed.
///
/// # Errors
///
/// Returns `LearnError::InvalidPlan` describing the first violation.
pub fn check_invariants(plan: &LearningPlan) -> Result<()> {
    let pending: Vec<usize> = plan
        .days
        .iter()
        .enumerate()
        .filter(|(_, d)| d.status == DayStatus::Pending)
        .map(|(i, _)| i)
        .collect();

    match pending.as_slice() {
        [] => {
            if let Some(day) = plan.days.iter().find(|d| !d.status.is_closed()) {
                return Err(LearnError::invalid_plan(format!(
                    "day {} is {} but no day is pending",
                    day.day_number,
                    day.status.as_str()
                )));
            }
        }
        [index] => {
            if let Some(day) = plan.days[..*index].iter().find(|d| !d.status.is_closed()) {
                return Err(LearnError::invalid_plan(format!(
                    "day {} precedes the pending day but is {}",
                    day.day_number,
                    day.status.as_str()
                )));
            }
            if let Some(day) = plan.days[index + 1..]
                .iter()
                .find(|d| d.status != DayStatus::Locked)
            {
                return Err(LearnError::invalid_plan(format!(
                    "day {} follows the pending day but is {}",
                    day.day_number,
                    day.status.as_str()
                )));
            }
        }
        _ => {
            return Err(LearnError::invalid_plan(format!(
                "{} days are pending at once",
                pending.len()
            )));
        }
    }

    for day in &plan.days {
        if let Some(task) = day.tasks.iter().find(|t| !t.completion_allowed()) {
            return Err(LearnError::invalid_plan(format!(
                "task '{}' of day {} is completed without verification",
                task.id, day.day_number
            )));
        }
    }
    Ok(())
}
