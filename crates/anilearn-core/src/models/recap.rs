//! End-of-day recap and answer evaluation values.

use serde::{Deserialize, Serialize};

use super::Language;

/// Suggested follow-up resource in a recap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecapExtension {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Generated summary for a completed day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recap {
    pub summary: String,
    #[serde(default)]
    pub extensions: Vec<RecapExtension>,
}

impl Recap {
    /// Fixed recap used whenever generation is unavailable.
    pub fn fallback(language: Language) -> Self {
        let summary = match language {
            Language::En => "Mission Complete! You are getting stronger!",
            Language::Zh => "任务完成！你变得更强了！",
        };
        Self {
            summary: summary.to_string(),
            extensions: Vec::new(),
        }
    }
}

/// Where an answer verdict came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationSource {
    /// Judged by the plan generator
    Generator,
    /// Generator failed; lenient default applied
    Fallback,
    /// Learner reported the verdict themselves
    SelfReport,
}

/// Verdict on a learner's answer to a verification question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: bool,
    #[serde(default)]
    pub feedback: String,
    #[serde(skip, default = "default_source")]
    pub source: EvaluationSource,
}

fn default_source() -> EvaluationSource {
    EvaluationSource::Generator
}

impl Evaluation {
    /// Lenient verdict used when the evaluator cannot be reached: the answer
    /// is accepted with a neutral message.
    pub fn fallback(language: Language) -> Self {
        let feedback = match language {
            Language::En => "I couldn't verify that right now, but I trust you!",
            Language::Zh => "我现在无法验证这个答案，但我相信你！",
        };
        Self {
            correct: true,
            feedback: feedback.to_string(),
            source: EvaluationSource::Fallback,
        }
    }

    /// Verdict reported by the learner when no evaluator is configured.
    pub fn self_report(correct: bool) -> Self {
        Self {
            correct,
            feedback: String::new(),
            source: EvaluationSource::SelfReport,
        }
    }
}
