//! Day and task operations for the Planner.
//!
//! Each operation loads the plan, applies a pure transition from
//! [`crate::progression`] and saves the result in one blocking call, so a
//! rejected transition writes nothing. Task changes are limited to the
//! pending day.

use log::warn;

use super::{Planner, PendingRecap};
use crate::{
    display::{AnswerResult, CompletionResult, UpdateResult},
    error::{LearnError, Result},
    generator::evaluate_or_fallback,
    models::{Evaluation, Language, LearningDay, LearningPlan, Task},
    params::{AnswerTask, DayRef, PlanId, TaskRef, UpdateDay},
    progression,
};

/// Resolves an optional day number to a concrete one, defaulting to the
/// current day.
fn resolve_day(plan: &LearningPlan, day_number: Option<u32>) -> Result<u32> {
    match day_number {
        Some(n) => plan.day(n).map(|d| d.day_number).ok_or_else(|| LearnError::DayNotFound {
            plan_id: plan.id.clone(),
            day_number: n,
        }),
        None => progression::current_day(plan)
            .map(|d| d.day_number)
            .ok_or_else(|| LearnError::invalid_plan("plan has no days")),
    }
}

fn find_task(plan: &LearningPlan, day_number: u32, task_id: &str) -> Result<Task> {
    plan.day(day_number)
        .and_then(|d| d.task(task_id))
        .cloned()
        .ok_or_else(|| LearnError::TaskNotFound {
            day_number,
            task_id: task_id.to_string(),
        })
}

impl Planner {
    /// Returns one day of a plan, or the current day when no number is given.
    pub async fn show_day(&self, params: &DayRef) -> Result<LearningDay> {
        let plan = self.get_plan(&PlanId { id: params.plan_id.clone() }).await?;
        let day_number = resolve_day(&plan, params.day_number)?;
        plan.day(day_number)
            .cloned()
            .ok_or_else(|| LearnError::DayNotFound {
                plan_id: plan.id.clone(),
                day_number,
            })
    }

    /// Flips a task's completion flag.
    ///
    /// # Errors
    ///
    /// Returns `LearnError::Precondition` when the day is not the pending
    /// day, or when completing a task whose verification question has not
    /// been answered.
    pub async fn toggle_task(&self, params: &TaskRef) -> Result<Task> {
        let params = params.clone();
        self.with_repository(move |repo| {
            let plan = repo.load(&params.plan_id)?;
            let day_number = resolve_day(&plan, params.day_number)?;
            progression::ensure_day_open(&plan, day_number)?;
            let task = progression::toggle_task(&find_task(&plan, day_number, &params.task_id)?)?;
            let updated = progression::update_task(&plan, day_number, task.clone())?;
            repo.save(&updated)?;
            Ok(task)
        })
        .await
    }

    /// Records an answer to a task's verification question.
    ///
    /// The verdict comes from the learner when `self_report` is set, else
    /// from the generator. A generator that fails, or does not answer within
    /// the planner's timeout, accepts the answer. A correct verdict
    /// completes the task.
    ///
    /// # Errors
    ///
    /// - `LearnError::InvalidInput` for a blank answer, or when neither a
    ///   self-reported verdict nor a generator is available
    /// - `LearnError::Precondition` when the task has no verification
    ///   question or its day is not the pending day
    pub async fn answer_task(&self, params: &AnswerTask) -> Result<AnswerResult> {
        let answer = params.validate()?.to_string();
        let plan = self
            .get_plan(&PlanId { id: params.task.plan_id.clone() })
            .await?;
        let day_number = resolve_day(&plan, params.task.day_number)?;
        progression::ensure_day_open(&plan, day_number)?;
        let task = find_task(&plan, day_number, &params.task.task_id)?;
        let question = task
            .verification_question
            .clone()
            .filter(|_| task.is_gated())
            .ok_or_else(|| {
                LearnError::precondition(format!("task '{}' has no verification question", task.id))
            })?;

        let evaluation = match (params.self_report, &self.generator) {
            (Some(correct), _) => Evaluation::self_report(correct),
            (None, Some(generator)) => {
                let language = self.language().await?;
                let evaluation =
                    evaluate_or_fallback(generator.as_ref(), &question, &answer, language);
                match self.timeout {
                    Some(limit) => tokio::time::timeout(limit, evaluation)
                        .await
                        .unwrap_or_else(|_| {
                            warn!("Answer evaluation timed out after {limit:?}; accepting answer");
                            Evaluation::fallback(language)
                        }),
                    None => evaluation.await,
                }
            }
            (None, None) => {
                return Err(LearnError::invalid_input("self_report")
                    .with_reason("No answer evaluator configured; report the verdict yourself"));
            }
        };

        let plan_id = params.task.plan_id.clone();
        let verdict = evaluation.clone();
        let answered = self
            .with_repository(move |repo| {
                // Reload: the plan may have changed while the evaluator ran
                let plan = repo.load(&plan_id)?;
                progression::ensure_day_open(&plan, day_number)?;
                let answered = progression::record_answer(
                    &find_task(&plan, day_number, &task.id)?,
                    &answer,
                    &verdict,
                );
                let updated = progression::update_task(&plan, day_number, answered.clone())?;
                repo.save(&updated)?;
                Ok(answered)
            })
            .await?;
        Ok(AnswerResult::new(answered, evaluation))
    }

    /// Edits a day's topic, summary, notes or mood.
    pub async fn update_day(&self, params: &UpdateDay) -> Result<UpdateResult<LearningDay>> {
        let request = params.validate()?;
        let day_ref = params.day.clone();
        self.with_repository(move |repo| {
            let plan = repo.load(&day_ref.plan_id)?;
            let day_number = resolve_day(&plan, day_ref.day_number)?;
            let updated = progression::update_day(&plan, day_number, &request)?;
            let stored = repo.save(&updated)?;
            let day = stored.day(day_number).cloned().ok_or(LearnError::DayNotFound {
                plan_id: stored.id.clone(),
                day_number,
            })?;
            let changes = request.changed_fields().into_iter().map(String::from).collect();
            Ok(UpdateResult::with_changes(day, changes))
        })
        .await
    }

    /// Completes the current day and unlocks the next one.
    ///
    /// The updated plan is saved before this returns. The recap for the
    /// completed day is generated in the background; await
    /// [`PendingRecap::wait`] to show it.
    ///
    /// # Errors
    ///
    /// - `LearnError::Precondition` when tasks are still open or the plan is
    ///   finished
    /// - `LearnError::InvalidPlan` for a plan or day without content
    pub async fn complete_day(&self, params: &PlanId) -> Result<(CompletionResult, PendingRecap)> {
        // Resolved up front: nothing may fail once the completion is saved
        let language = self.language().await.unwrap_or_else(|e| {
            warn!("Could not read language preference ({e}); using the default");
            Language::default()
        });

        let id = params.id.clone();
        let (plan, day) = self
            .with_repository(move |repo| {
                let plan = repo.load(&id)?;
                let updated = progression::complete_day(&plan)?;
                let stored = repo.save(&updated)?;
                let completed = progression::current_day(&plan)
                    .and_then(|d| stored.day(d.day_number))
                    .cloned()
                    .ok_or_else(|| LearnError::invalid_plan("plan has no days"))?;
                Ok((stored, completed))
            })
            .await?;

        let recap = match &self.generator {
            Some(generator) => PendingRecap::spawn(generator.clone(), day.clone(), language),
            None => PendingRecap::fallback(language),
        };
        Ok((CompletionResult::new(plan, day.day_number), recap))
    }
}
