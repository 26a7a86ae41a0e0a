#![allow(dead_code)]

use anilearn_core::{
    generator::{gemini::parse_days, DayDraft},
    models::{Evaluation, Language, LearningDay, Recap},
    LearnError, PlanGenerator, PlanRequest, Planner, PlannerBuilder, Result,
};
use async_trait::async_trait;
use tempfile::TempDir;

/// Two-day plan in the generator's wire format. Day 1 has a plain task and a
/// gated one; day 2 has a single plain task.
pub const TWO_DAY_PLAN: &str = r#"[
  {
    "dayNumber": 1,
    "topic": "Ownership",
    "summary": "Moves and borrows",
    "tasks": [
      {"id": "read", "description": "Read chapter 4", "estimatedMinutes": 60,
       "links": [{"label": "The Book", "url": "https://doc.rust-lang.org/book/"}]},
      {"id": "quiz", "description": "Explain a move", "estimatedMinutes": 30,
       "verificationQuestion": "What happens to a String on move?",
       "answerKey": "Ownership transfers"}
    ]
  },
  {
    "dayNumber": 2,
    "topic": "Lifetimes",
    "summary": "Annotating references",
    "tasks": [
      {"id": "read", "description": "Read chapter 10.3", "estimatedMinutes": 45}
    ]
  }
]"#;

/// Generator that replays a fixed response text for plans.
pub struct ScriptedGenerator {
    pub plan_response: String,
}

impl ScriptedGenerator {
    pub fn new(plan_response: impl Into<String>) -> Self {
        Self {
            plan_response: plan_response.into(),
        }
    }
}

#[async_trait]
impl PlanGenerator for ScriptedGenerator {
    async fn generate_plan(&self, _request: &PlanRequest) -> Result<Vec<DayDraft>> {
        parse_days(&self.plan_response)
    }

    async fn generate_recap(&self, day: &LearningDay, _language: Language) -> Result<Recap> {
        Ok(Recap {
            summary: format!("You conquered {}!", day.topic),
            extensions: vec![],
        })
    }

    async fn evaluate_answer(
        &self,
        _question: &str,
        answer: &str,
        _language: Language,
    ) -> Result<Evaluation> {
        Ok(Evaluation::self_report(answer.contains("transfer")))
    }
}

/// Generator whose plan drafting works but whose recap and evaluation
/// always fail.
pub struct FailingGenerator;

#[async_trait]
impl PlanGenerator for FailingGenerator {
    async fn generate_plan(&self, _request: &PlanRequest) -> Result<Vec<DayDraft>> {
        parse_days(TWO_DAY_PLAN)
    }

    async fn generate_recap(&self, _day: &LearningDay, _language: Language) -> Result<Recap> {
        Err(LearnError::Generation {
            message: "recap service down".to_string(),
        })
    }

    async fn evaluate_answer(
        &self,
        _question: &str,
        _answer: &str,
        _language: Language,
    ) -> Result<Evaluation> {
        Err(LearnError::Generation {
            message: "evaluation service down".to_string(),
        })
    }
}

/// Helper function to create a test planner on a temporary database
pub async fn create_test_planner<G: PlanGenerator + 'static>(generator: G) -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_generator(generator)
        .with_language(Some(Language::En))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}
