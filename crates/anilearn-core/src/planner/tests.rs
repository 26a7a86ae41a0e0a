//! Tests for the planner module.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use tempfile::TempDir;

use super::*;
use crate::{
    generator::{DayDraft, PlanRequest, TaskDraft},
    models::{DayStatus, Evaluation, EvaluationSource, LearningDay, Recap, Theme},
    params::{AnswerTask, CreatePlan, DayRef, PlanId, TaskRef, UpdateDay},
    repository::PREFERENCES_KEY,
    store::MemoryStore,
};

/// Generator returning a fixed plan; every task on day 1 except the first
/// carries a verification question.
#[derive(Default)]
struct StubGenerator {
    fail_evaluation: bool,
    evaluation_delay: Option<Duration>,
    evaluations: Arc<AtomicUsize>,
}

#[async_trait]
impl PlanGenerator for StubGenerator {
    async fn generate_plan(&self, request: &PlanRequest) -> Result<Vec<DayDraft>> {
        Ok((1..=request.total_days)
            .map(|n| DayDraft {
                day_number: n,
                topic: format!("{} day {n}", request.topic),
                summary: "Practice".to_string(),
                tasks: vec![
                    TaskDraft {
                        id: Some("read".to_string()),
                        description: "Read the chapter".to_string(),
                        estimated_minutes: Some(60),
                        links: vec![],
                        verification_question: None,
                        answer_key: None,
                    },
                    TaskDraft {
                        id: Some("quiz".to_string()),
                        description: "Answer the quiz".to_string(),
                        estimated_minutes: Some(30),
                        links: vec![],
                        verification_question: Some("What moves?".to_string()),
                        answer_key: Some("Ownership".to_string()),
                    },
                ],
            })
            .collect())
    }

    async fn generate_recap(&self, day: &LearningDay, _language: Language) -> Result<Recap> {
        Ok(Recap {
            summary: format!("Finished {}", day.topic),
            extensions: vec![],
        })
    }

    async fn evaluate_answer(
        &self,
        _question: &str,
        answer: &str,
        _language: Language,
    ) -> Result<Evaluation> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.evaluation_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_evaluation {
            return Err(LearnError::generation("service unavailable"));
        }
        Ok(Evaluation {
            correct: answer.contains("Ownership"),
            feedback: "Checked".to_string(),
            source: EvaluationSource::Generator,
        })
    }
}

/// Helper function to create a test planner backed by a temporary database
async fn create_test_planner(generator: StubGenerator) -> (TempDir, Planner) {
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

async fn create_plan(planner: &Planner, days: u32) -> String {
    planner
        .create_plan(&CreatePlan {
            topic: "Rust".to_string(),
            context: Some("evenings".to_string()),
            total_days: Some(days),
        })
        .await
        .expect("Failed to create plan")
        .id
}

fn task_ref(plan_id: &str, task_id: &str) -> TaskRef {
    TaskRef {
        plan_id: plan_id.to_string(),
        day_number: None,
        task_id: task_id.to_string(),
    }
}

fn task_ref_on(plan_id: &str, day_number: u32, task_id: &str) -> TaskRef {
    TaskRef {
        day_number: Some(day_number),
        ..task_ref(plan_id, task_id)
    }
}

/// Finishes every task of the current day.
async fn finish_current_day_tasks(planner: &Planner, id: &str) {
    planner.toggle_task(&task_ref(id, "read")).await.unwrap();
    planner
        .answer_task(&AnswerTask {
            task: task_ref(id, "quiz"),
            answer: "Ownership".to_string(),
            self_report: Some(true),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_plan_persists_and_indexes() {
    let (_temp_dir, planner) = create_test_planner(StubGenerator::default()).await;

    let id = create_plan(&planner, 3).await;

    let index = planner.list_plans().await.expect("Failed to list plans");
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].id, id);
    assert_eq!(index[0].total_days, 3);

    let plan = planner.get_plan(&PlanId { id }).await.expect("Failed to load");
    assert_eq!(plan.days[0].status, DayStatus::Pending);
    assert_eq!(plan.context.as_deref(), Some("evenings"));
}

#[tokio::test]
async fn test_create_plan_without_generator_is_configuration_error() {
    let planner = PlannerBuilder::new()
        .with_store(MemoryStore::new())
        .build()
        .await
        .unwrap();

    let result = planner
        .create_plan(&CreatePlan {
            topic: "Rust".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(LearnError::Configuration { .. })));
    assert!(planner.list_plans().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_respects_verification_gate() {
    let (_temp_dir, planner) = create_test_planner(StubGenerator::default()).await;
    let id = create_plan(&planner, 2).await;

    let read = planner.toggle_task(&task_ref(&id, "read")).await.unwrap();
    assert!(read.is_completed);

    let quiz = planner.toggle_task(&task_ref(&id, "quiz")).await;
    assert!(matches!(quiz, Err(LearnError::Precondition { .. })));

    let missing = planner.toggle_task(&task_ref(&id, "nope")).await;
    assert!(matches!(missing, Err(LearnError::TaskNotFound { .. })));
}

#[tokio::test]
async fn test_answer_then_complete_day_with_recap() {
    let (_temp_dir, planner) = create_test_planner(StubGenerator::default()).await;
    let id = create_plan(&planner, 2).await;

    planner.toggle_task(&task_ref(&id, "read")).await.unwrap();

    let wrong = planner
        .answer_task(&AnswerTask {
            task: task_ref(&id, "quiz"),
            answer: "Nothing".to_string(),
            self_report: None,
        })
        .await
        .unwrap();
    assert!(!wrong.evaluation.correct);
    assert!(!wrong.task.is_completed);
    assert!(wrong.task.is_verified);

    let right = planner
        .answer_task(&AnswerTask {
            task: task_ref(&id, "quiz"),
            answer: "Ownership".to_string(),
            self_report: None,
        })
        .await
        .unwrap();
    assert!(right.task.is_completed);

    let (completion, recap) = planner
        .complete_day(&PlanId { id: id.clone() })
        .await
        .expect("Failed to complete day");
    assert_eq!(completion.day_number, 1);
    assert_eq!(completion.plan.progress, 50);
    assert!(recap.is_generated());
    assert_eq!(recap.wait().await.summary, "Finished Rust day 1");

    // The completion was persisted before the recap resolved
    let day = planner
        .show_day(&DayRef {
            plan_id: id,
            day_number: None,
        })
        .await
        .unwrap();
    assert_eq!(day.day_number, 2);
    assert_eq!(day.status, DayStatus::Pending);
}

#[tokio::test]
async fn test_failing_evaluator_accepts_answer() {
    let generator = StubGenerator {
        fail_evaluation: true,
        ..Default::default()
    };
    let calls = Arc::clone(&generator.evaluations);
    let (_temp_dir, planner) = create_test_planner(generator).await;
    let id = create_plan(&planner, 1).await;

    let result = planner
        .answer_task(&AnswerTask {
            task: task_ref(&id, "quiz"),
            answer: "I think it is about moves".to_string(),
            self_report: None,
        })
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(result.evaluation.correct);
    assert_eq!(result.evaluation.source, EvaluationSource::Fallback);
    assert!(result.task.is_completed);
}

#[tokio::test]
async fn test_self_report_skips_evaluator() {
    let generator = StubGenerator::default();
    let calls = Arc::clone(&generator.evaluations);
    let (_temp_dir, planner) = create_test_planner(generator).await;
    let id = create_plan(&planner, 1).await;

    let result = planner
        .answer_task(&AnswerTask {
            task: task_ref(&id, "quiz"),
            answer: "Ownership".to_string(),
            self_report: Some(true),
        })
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(result.evaluation.source, EvaluationSource::SelfReport);
    assert!(result.task.is_completed);
}

#[tokio::test]
async fn test_answer_on_ungated_task_is_rejected() {
    let (_temp_dir, planner) = create_test_planner(StubGenerator::default()).await;
    let id = create_plan(&planner, 1).await;

    let result = planner
        .answer_task(&AnswerTask {
            task: task_ref(&id, "read"),
            answer: "Done".to_string(),
            self_report: Some(true),
        })
        .await;
    assert!(matches!(result, Err(LearnError::Precondition { .. })));
}

#[tokio::test]
async fn test_complete_day_with_open_tasks_changes_nothing() {
    let (_temp_dir, planner) = create_test_planner(StubGenerator::default()).await;
    let id = create_plan(&planner, 2).await;
    let before = planner.get_plan(&PlanId { id: id.clone() }).await.unwrap();

    let result = planner.complete_day(&PlanId { id: id.clone() }).await;
    assert!(matches!(result, Err(LearnError::Precondition { .. })));

    let after = planner.get_plan(&PlanId { id }).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_update_day_reports_changes() {
    let (_temp_dir, planner) = create_test_planner(StubGenerator::default()).await;
    let id = create_plan(&planner, 2).await;

    let result = planner
        .update_day(&UpdateDay {
            day: DayRef {
                plan_id: id,
                day_number: Some(2),
            },
            notes: Some("Review lifetimes first".to_string()),
            mood: Some("confused".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(result.changes, vec!["notes", "mood"]);
    assert_eq!(result.resource.day_number, 2);
    assert_eq!(result.resource.status, DayStatus::Locked);
    assert_eq!(result.resource.user_notes.as_deref(), Some("Review lifetimes first"));
}

#[tokio::test]
async fn test_delete_plan_returns_removed_entry() {
    let (_temp_dir, planner) = create_test_planner(StubGenerator::default()).await;
    let id = create_plan(&planner, 1).await;

    let removed = planner.delete_plan(&PlanId { id: id.clone() }).await.unwrap();
    assert_eq!(removed.map(|m| m.id), Some(id.clone()));

    let again = planner.delete_plan(&PlanId { id: id.clone() }).await.unwrap();
    assert!(again.is_none());
    assert!(planner.get_plan(&PlanId { id }).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_export_import_roundtrip() {
    let (_temp_dir, planner) = create_test_planner(StubGenerator::default()).await;
    let id = create_plan(&planner, 2).await;
    let json = planner.export_plan(&PlanId { id: id.clone() }).await.unwrap();

    planner.delete_plan(&PlanId { id: id.clone() }).await.unwrap();
    let imported = planner.import_plan(&json).await.unwrap();

    assert_eq!(imported.id, id);
    assert_eq!(planner.list_plans().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_import_rejects_inconsistent_statuses() {
    let (_temp_dir, planner) = create_test_planner(StubGenerator::default()).await;
    let id = create_plan(&planner, 2).await;
    let mut plan = planner.get_plan(&PlanId { id }).await.unwrap();
    plan.days[1].status = DayStatus::Pending;
    let json = serde_json::to_string(&plan).unwrap();

    assert!(matches!(
        planner.import_plan(&json).await,
        Err(LearnError::InvalidPlan { .. })
    ));
    assert!(matches!(
        planner.import_plan("not json").await,
        Err(LearnError::InvalidInput { .. })
    ));
}

#[tokio::test]
async fn test_preferences_roundtrip() {
    let planner = PlannerBuilder::new()
        .with_store(MemoryStore::new())
        .build()
        .await
        .unwrap();

    let prefs = planner.preferences().await.unwrap();
    assert_eq!(prefs.language, Language::Zh);
    assert_eq!(prefs.theme, Theme::Light);

    assert_eq!(planner.toggle_theme().await.unwrap().theme, Theme::Dark);
    let prefs = planner.set_language(Language::En).await.unwrap();
    assert_eq!(prefs.language, Language::En);
    assert_eq!(prefs.theme, Theme::Dark);
    assert_eq!(planner.language().await.unwrap(), Language::En);
}

#[tokio::test]
async fn test_dashboard_counts_completed_days() {
    let (_temp_dir, planner) = create_test_planner(StubGenerator::default()).await;
    let id = create_plan(&planner, 3).await;
    planner.toggle_task(&task_ref(&id, "read")).await.unwrap();
    planner
        .answer_task(&AnswerTask {
            task: task_ref(&id, "quiz"),
            answer: "Ownership".to_string(),
            self_report: None,
        })
        .await
        .unwrap();
    planner.complete_day(&PlanId { id: id.clone() }).await.unwrap();

    let stats = planner.dashboard(&PlanId { id }).await.unwrap();
    assert_eq!(stats.completed_days, 1);
    assert_eq!(stats.completion_percent, 33);
    assert_eq!(stats.minutes_invested, 90);
    assert_eq!(stats.upcoming.len(), 2);
}

#[tokio::test]
async fn test_tasks_on_locked_day_cannot_change() {
    let generator = StubGenerator::default();
    let calls = Arc::clone(&generator.evaluations);
    let (_temp_dir, planner) = create_test_planner(generator).await;
    let id = create_plan(&planner, 2).await;

    let toggled = planner.toggle_task(&task_ref_on(&id, 2, "read")).await;
    assert!(matches!(toggled, Err(LearnError::Precondition { .. })));

    let answered = planner
        .answer_task(&AnswerTask {
            task: task_ref_on(&id, 2, "quiz"),
            answer: "Ownership".to_string(),
            self_report: None,
        })
        .await;
    assert!(matches!(answered, Err(LearnError::Precondition { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let plan = planner.get_plan(&PlanId { id }).await.unwrap();
    assert_eq!(plan.progress, 0);
    assert_eq!(plan.days[1].status, DayStatus::Locked);
    assert!(plan.days[1].tasks.iter().all(|t| !t.is_completed));
}

#[tokio::test]
async fn test_tasks_on_completed_day_stay_done() {
    let (_temp_dir, planner) = create_test_planner(StubGenerator::default()).await;
    let id = create_plan(&planner, 2).await;
    finish_current_day_tasks(&planner, &id).await;
    planner.complete_day(&PlanId { id: id.clone() }).await.unwrap();

    let reopened = planner.toggle_task(&task_ref_on(&id, 1, "read")).await;
    assert!(matches!(reopened, Err(LearnError::Precondition { .. })));

    let plan = planner.get_plan(&PlanId { id }).await.unwrap();
    assert!(plan.days[0].tasks.iter().all(|t| t.is_completed));
}

#[tokio::test]
async fn test_complete_day_survives_unreadable_preferences() {
    let planner = PlannerBuilder::new()
        .with_store(MemoryStore::new())
        .with_generator(StubGenerator::default())
        .build()
        .await
        .unwrap();
    let id = create_plan(&planner, 2).await;
    finish_current_day_tasks(&planner, &id).await;
    planner.store.set(PREFERENCES_KEY, "{not json").unwrap();

    let (completion, recap) = planner
        .complete_day(&PlanId { id: id.clone() })
        .await
        .expect("completion must not depend on preferences");
    assert_eq!(completion.day_number, 1);
    assert_eq!(recap.wait().await.summary, "Finished Rust day 1");

    let plan = planner.get_plan(&PlanId { id }).await.unwrap();
    assert_eq!(plan.days[0].status, DayStatus::Completed);
    assert_eq!(plan.days[1].status, DayStatus::Pending);
}

#[tokio::test]
async fn test_slow_evaluator_falls_back_after_timeout() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_generator(StubGenerator {
            evaluation_delay: Some(Duration::from_secs(30)),
            ..Default::default()
        })
        .with_language(Some(Language::En))
        .with_timeout(Some(Duration::from_millis(50)))
        .build()
        .await
        .expect("Failed to create planner");
    let id = create_plan(&planner, 1).await;

    let result = planner
        .answer_task(&AnswerTask {
            task: task_ref(&id, "quiz"),
            answer: "Something about moves".to_string(),
            self_report: None,
        })
        .await
        .expect("a slow evaluator must not fail the answer");

    assert_eq!(result.evaluation.source, EvaluationSource::Fallback);
    assert!(result.task.is_completed);

    let plan = planner.get_plan(&PlanId { id }).await.unwrap();
    assert!(plan.days[0].tasks[1].is_verified);
}
