//! Task model definition and related functionality.

use serde::{Deserialize, Serialize};

/// A labelled resource link attached to a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskLink {
    pub label: String,
    pub url: String,
}

/// Atomic unit of work within a learning day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier, unique within its day
    pub id: String,

    /// What the learner should do
    pub description: String,

    /// Estimated effort in minutes
    pub estimated_minutes: u32,

    #[serde(default)]
    pub is_completed: bool,

    /// Resources specific to this task
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<TaskLink>,

    /// Question the learner must answer before the task counts as done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_question: Option<String>,

    /// Reference answer for the verification question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_key: Option<String>,

    #[serde(default)]
    pub user_answer: String,

    #[serde(default)]
    pub is_verified: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_feedback: Option<String>,
}

impl Task {
    /// Creates an ungated, incomplete task.
    pub fn new(id: impl Into<String>, description: impl Into<String>, estimated_minutes: u32) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            estimated_minutes,
            is_completed: false,
            links: Vec::new(),
            verification_question: None,
            answer_key: None,
            user_answer: String::new(),
            is_verified: false,
            ai_feedback: None,
        }
    }

    /// Attaches a verification question and its reference answer.
    pub fn with_question(mut self, question: impl Into<String>, answer_key: impl Into<String>) -> Self {
        self.verification_question = Some(question.into());
        self.answer_key = Some(answer_key.into());
        self
    }

    /// Adds a resource link.
    pub fn with_link(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.links.push(TaskLink {
            label: label.into(),
            url: url.into(),
        });
        self
    }

    /// True when completion must go through answer verification.
    pub fn is_gated(&self) -> bool {
        self.verification_question
            .as_deref()
            .is_some_and(|q| !q.trim().is_empty())
    }

    /// Whether the completion flag respects the verification gate.
    pub fn completion_allowed(&self) -> bool {
        !self.is_completed || !self.is_gated() || self.is_verified
    }
}
