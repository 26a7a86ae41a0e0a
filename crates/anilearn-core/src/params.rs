//! Parameter structures for planner operations.
//!
//! Interface layers (currently the CLI) define their own wrapper structs with
//! framework derives and convert them into these types, so the core stays
//! free of argument-parsing dependencies:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │
//! │  (clap derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```ignore
//! #[derive(Args)]
//! pub struct CreatePlanArgs {
//!     pub topic: String,
//!     #[arg(long)]
//!     pub days: Option<u32>,
//! }
//!
//! impl From<CreatePlanArgs> for CreatePlan {
//!     fn from(args: CreatePlanArgs) -> Self {
//!         CreatePlan { topic: args.topic, context: None, total_days: args.days }
//!     }
//! }
//! ```
//!
//! Values that need parsing (moods, answers) are validated here, before any
//! storage access.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::{LearnError, Result},
    generator::{PlanRequest, DEFAULT_TOTAL_DAYS},
    models::{Language, Mood, UpdateDayRequest},
};

/// Parameters for operations addressing a single plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanId {
    /// The ID of the plan to operate on
    pub id: String,
}

/// Parameters for generating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    /// What to learn (required)
    pub topic: String,
    /// Background, constraints and goals
    pub context: Option<String>,
    /// Plan length in days; defaults to two weeks
    pub total_days: Option<u32>,
}

impl CreatePlan {
    /// Builds a validated generator request in `language`.
    ///
    /// # Errors
    ///
    /// Returns `LearnError::InvalidInput` for a blank topic or an out-of-range
    /// day count.
    ///
    /// ```rust
    /// use anilearn_core::{models::Language, params::CreatePlan};
    ///
    /// let params = CreatePlan {
    ///     topic: "Rust".to_string(),
    ///     context: None,
    ///     total_days: None,
    /// };
    /// let request = params.to_request(Language::En)?;
    /// assert_eq!(request.total_days, 14);
    ///
    /// let blank = CreatePlan::default();
    /// assert!(blank.to_request(Language::En).is_err());
    /// # anilearn_core::Result::<()>::Ok(())
    /// ```
    pub fn to_request(&self, language: Language) -> Result<PlanRequest> {
        let request = PlanRequest::new(
            self.topic.trim(),
            self.context.as_deref().unwrap_or_default().trim(),
        )
        .with_total_days(self.total_days.unwrap_or(DEFAULT_TOTAL_DAYS))
        .with_language(language);
        request.validate()?;
        Ok(request)
    }
}

/// Parameters addressing one day of a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayRef {
    pub plan_id: String,
    /// 1-based day number; `None` means the current day
    pub day_number: Option<u32>,
}

/// Parameters addressing one task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRef {
    pub plan_id: String,
    /// Day holding the task; `None` means the current day
    pub day_number: Option<u32>,
    pub task_id: String,
}

/// Parameters for answering a task's verification question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerTask {
    #[serde(flatten)]
    pub task: TaskRef,
    /// The learner's free-text answer
    pub answer: String,
    /// Verdict supplied by the learner. When set, no evaluator is consulted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_report: Option<bool>,
}

impl AnswerTask {
    /// Returns the trimmed answer.
    ///
    /// # Errors
    ///
    /// Returns `LearnError::InvalidInput` when the answer is blank.
    pub fn validate(&self) -> Result<&str> {
        let answer = self.answer.trim();
        if answer.is_empty() {
            return Err(LearnError::invalid_input("answer").with_reason("Answer cannot be empty"));
        }
        Ok(answer)
    }
}

/// Parameters for editing a day's free-form fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDay {
    #[serde(flatten)]
    pub day: DayRef,
    pub topic: Option<String>,
    pub summary: Option<String>,
    /// New notes; an empty string clears them
    pub notes: Option<String>,
    /// One of 'happy', 'neutral', 'tired' or 'confused'
    pub mood: Option<String>,
}

impl UpdateDay {
    /// Parses the edit into an [`UpdateDayRequest`].
    ///
    /// # Errors
    ///
    /// * `LearnError::InvalidInput` - When the mood is not recognised
    /// * `LearnError::InvalidInput` - When no field is set
    pub fn validate(&self) -> Result<UpdateDayRequest> {
        let mood = self
            .mood
            .as_deref()
            .map(|m| {
                Mood::from_str(m).map_err(|_| {
                    LearnError::invalid_input("mood").with_reason(format!(
                        "Invalid mood: {m}. Must be 'happy', 'neutral', 'tired', or 'confused'"
                    ))
                })
            })
            .transpose()?;

        let request = UpdateDayRequest {
            topic: self.topic.clone(),
            summary: self.summary.clone(),
            user_notes: self.notes.clone(),
            mood,
        };
        if request.is_empty() {
            return Err(LearnError::invalid_input("day").with_reason("Nothing to update"));
        }
        Ok(request)
    }
}
