//! Plan generation through an external generative-language service.
//!
//! The [`PlanGenerator`] trait is the seam to the service. It has three
//! capabilities: drafting a plan, writing a recap for a finished day, and
//! judging a free-text answer. Only plan drafting is critical; the other two
//! degrade to fixed defaults through [`recap_or_fallback`] and
//! [`evaluate_or_fallback`].
//!
//! [`generate_plan`] turns drafts into a fresh [`LearningPlan`] and never
//! touches storage, so a failed or cancelled call leaves nothing behind.

use async_trait::async_trait;
use jiff::Timestamp;
use log::{info, warn};
use serde::Deserialize;

use crate::{
    error::{LearnError, Result},
    models::{
        DayStatus, Evaluation, EvaluationSource, Language, LearningDay, LearningPlan, Recap,
        Task, TaskLink,
    },
};

pub mod gemini;

pub use gemini::{GeminiConfig, GeminiGenerator};

/// Default plan length in days.
pub const DEFAULT_TOTAL_DAYS: u32 = 14;

/// Longest plan that may be requested.
pub const MAX_TOTAL_DAYS: u32 = 60;

/// What the learner asked for.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub topic: String,
    /// Free-text constraints and background
    pub context: String,
    pub total_days: u32,
    pub language: Language,
}

impl PlanRequest {
    pub fn new(topic: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            context: context.into(),
            total_days: DEFAULT_TOTAL_DAYS,
            language: Language::default(),
        }
    }

    pub fn with_total_days(mut self, total_days: u32) -> Self {
        self.total_days = total_days;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Rejects blank topics and day counts outside `1..=MAX_TOTAL_DAYS`.
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(LearnError::invalid_input("topic").with_reason("Topic cannot be empty"));
        }
        if !(1..=MAX_TOTAL_DAYS).contains(&self.total_days) {
            return Err(LearnError::invalid_input("total_days")
                .with_reason(format!("Must be between 1 and {MAX_TOTAL_DAYS}")));
        }
        Ok(())
    }
}

/// A task as described by the generator, before any learner state exists.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub description: String,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub links: Vec<TaskLink>,
    #[serde(default)]
    pub verification_question: Option<String>,
    #[serde(default)]
    pub answer_key: Option<String>,
}

/// A day as described by the generator.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayDraft {
    pub day_number: u32,
    pub topic: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tasks: Vec<TaskDraft>,
}

/// External generative service used to draft plans, recaps and verdicts.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Drafts the days of a plan for `request`.
    async fn generate_plan(&self, request: &PlanRequest) -> Result<Vec<DayDraft>>;

    /// Writes a short recap of a finished day.
    async fn generate_recap(&self, day: &LearningDay, language: Language) -> Result<Recap>;

    /// Judges `answer` against `question`.
    async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
        language: Language,
    ) -> Result<Evaluation>;
}

/// Generates a brand-new plan: day 1 pending, every other day locked, no
/// task completed.
///
/// # Errors
///
/// - `LearnError::InvalidInput` for a bad request
/// - `LearnError::Generation` when the service fails or its drafts do not
///   form a valid plan
pub async fn generate_plan(
    generator: &dyn PlanGenerator,
    request: &PlanRequest,
) -> Result<LearningPlan> {
    request.validate()?;
    let drafts = generator.generate_plan(request).await?;
    let plan = assemble_plan(request, drafts, Timestamp::now())?;
    info!("Generated {}-day plan '{}' ({})", plan.total_days, plan.title, plan.id);
    Ok(plan)
}

/// Builds a fresh plan from generator drafts.
///
/// Drafts are ordered by day number, which must run 1..=n without gaps. Each
/// day needs at least one task, every task a positive duration, and every
/// verification question a reference answer. Missing task ids are filled in.
pub fn assemble_plan(
    request: &PlanRequest,
    mut drafts: Vec<DayDraft>,
    created_at: Timestamp,
) -> Result<LearningPlan> {
    if drafts.is_empty() {
        return Err(LearnError::generation("the response contained no days"));
    }
    if drafts.len() != usize::try_from(request.total_days).unwrap_or(usize::MAX) {
        warn!(
            "Requested {} days but the generator returned {}",
            request.total_days,
            drafts.len()
        );
    }
    drafts.sort_by_key(|d| d.day_number);

    let mut days = Vec::with_capacity(drafts.len());
    for (index, draft) in drafts.into_iter().enumerate() {
        let expected = u32::try_from(index + 1)
            .map_err(|_| LearnError::generation("too many days in the response"))?;
        if draft.day_number != expected {
            return Err(LearnError::generation(format!(
                "day numbers are not contiguous: expected {expected}, found {}",
                draft.day_number
            )));
        }
        days.push(assemble_day(draft)?);
    }

    let total_days = u32::try_from(days.len())
        .map_err(|_| LearnError::generation("too many days in the response"))?;
    let context = request.context.trim();

    Ok(LearningPlan {
        id: uuid::Uuid::new_v4().to_string(),
        title: request.topic.trim().to_string(),
        topic: request.topic.trim().to_string(),
        total_days,
        created_at,
        context: (!context.is_empty()).then(|| context.to_string()),
        days,
        progress: 0,
    })
}

fn assemble_day(draft: DayDraft) -> Result<LearningDay> {
    let day_number = draft.day_number;
    if draft.tasks.is_empty() {
        return Err(LearnError::generation(format!("day {day_number} has no tasks")));
    }

    let mut tasks: Vec<Task> = Vec::with_capacity(draft.tasks.len());
    for (index, task) in draft.tasks.into_iter().enumerate() {
        let minutes = task.estimated_minutes.filter(|m| *m > 0).ok_or_else(|| {
            LearnError::generation(format!(
                "task {} of day {day_number} has no positive duration",
                index + 1
            ))
        })?;

        let question = task.verification_question.filter(|q| !q.trim().is_empty());
        let answer_key = task.answer_key.filter(|a| !a.trim().is_empty());
        if question.is_some() && answer_key.is_none() {
            return Err(LearnError::generation(format!(
                "task {} of day {day_number} has a question without a reference answer",
                index + 1
            )));
        }

        let mut id = task
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("d{day_number}-t{}", index + 1));
        if tasks.iter().any(|t| t.id == id) {
            id = format!("{id}-{}", index + 1);
        }

        tasks.push(Task {
            id,
            description: task.description,
            estimated_minutes: minutes,
            is_completed: false,
            links: task.links,
            verification_question: question,
            answer_key,
            user_answer: String::new(),
            is_verified: false,
            ai_feedback: None,
        });
    }

    Ok(LearningDay {
        day_number,
        topic: draft.topic,
        summary: draft.summary,
        tasks,
        status: if day_number == 1 {
            DayStatus::Pending
        } else {
            DayStatus::Locked
        },
        user_notes: None,
        completion_date: None,
        mood: None,
    })
}

/// Generates a recap, substituting the fixed default on any failure.
pub async fn recap_or_fallback(
    generator: &dyn PlanGenerator,
    day: &LearningDay,
    language: Language,
) -> Recap {
    match generator.generate_recap(day, language).await {
        Ok(recap) if !recap.summary.trim().is_empty() => recap,
        Ok(_) => {
            warn!("Recap for day {} was empty, using default", day.day_number);
            Recap::fallback(language)
        }
        Err(e) => {
            warn!("Recap generation for day {} failed: {e}, using default", day.day_number);
            Recap::fallback(language)
        }
    }
}

/// Evaluates an answer, accepting it with a neutral message when the
/// evaluator fails.
pub async fn evaluate_or_fallback(
    generator: &dyn PlanGenerator,
    question: &str,
    answer: &str,
    language: Language,
) -> Evaluation {
    match generator.evaluate_answer(question, answer, language).await {
        Ok(mut evaluation) => {
            evaluation.source = EvaluationSource::Generator;
            evaluation
        }
        Err(e) => {
            warn!("Answer evaluation failed: {e}, accepting answer");
            Evaluation::fallback(language)
        }
    }
}
