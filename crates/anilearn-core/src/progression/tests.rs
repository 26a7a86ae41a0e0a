//! Tests for the progression engine.

use jiff::Timestamp;

use super::*;
use crate::models::{EvaluationSource, Mood};

fn day(number: u32, status: DayStatus, tasks: Vec<Task>) -> LearningDay {
    LearningDay {
        day_number: number,
        topic: format!("Topic {number}"),
        summary: format!("Summary {number}"),
        tasks,
        status,
        user_notes: None,
        completion_date: None,
        mood: None,
    }
}

/// Plan with `days` days of one ungated task each; day 1 pending.
fn fresh_plan(days: u32) -> LearningPlan {
    let days = (1..=days)
        .map(|n| {
            let status = if n == 1 { DayStatus::Pending } else { DayStatus::Locked };
            day(n, status, vec![Task::new(format!("d{n}-t1"), format!("Study {n}"), 60)])
        })
        .collect::<Vec<_>>();
    LearningPlan {
        id: "plan-1".to_string(),
        title: "Rust".to_string(),
        topic: "Rust".to_string(),
        total_days: u32::try_from(days.len()).unwrap(),
        created_at: Timestamp::from_second(1_700_000_000).unwrap(),
        context: Some("two hours a day".to_string()),
        days,
        progress: 0,
    }
}

fn complete_task(plan: &LearningPlan, day_number: u32) -> LearningPlan {
    let mut task = plan.day(day_number).unwrap().tasks[0].clone();
    task.is_completed = true;
    update_task(plan, day_number, task).expect("update task")
}

fn now() -> Timestamp {
    Timestamp::from_second(1_700_086_400).unwrap()
}

#[test]
fn test_current_day_is_pending_day() {
    let plan = fresh_plan(3);
    assert_eq!(current_day(&plan).unwrap().day_number, 1);
}

#[test]
fn test_current_day_falls_back_to_last_day() {
    let mut plan = fresh_plan(2);
    for d in &mut plan.days {
        d.status = DayStatus::Completed;
    }
    assert_eq!(current_day(&plan).unwrap().day_number, 2);
}

#[test]
fn test_current_day_of_empty_plan_is_none() {
    let mut plan = fresh_plan(1);
    plan.days.clear();
    assert!(current_day(&plan).is_none());
}

#[test]
fn test_three_day_scenario() {
    let plan = fresh_plan(3);

    let plan = complete_task(&plan, 1);
    let plan = complete_day_at(&plan, now()).expect("complete day 1");

    assert_eq!(plan.days[0].status, DayStatus::Completed);
    assert_eq!(plan.days[0].completion_date, Some(now()));
    assert_eq!(plan.days[1].status, DayStatus::Pending);
    assert_eq!(plan.days[2].status, DayStatus::Locked);
    assert_eq!(plan.computed_progress(), 33);
    check_invariants(&plan).expect("invariants hold");

    // Day 2's task is still open
    let err = complete_day_at(&plan, now()).unwrap_err();
    assert!(matches!(err, LearnError::Precondition { .. }));
    assert_eq!(plan.computed_progress(), 33);
    assert_eq!(current_day(&plan).unwrap().day_number, 2);
}

#[test]
fn test_failed_completion_leaves_input_unchanged() {
    let plan = fresh_plan(2);
    let before = plan.clone();

    assert!(complete_day(&plan).is_err());
    assert_eq!(plan, before);
}

#[test]
fn test_completing_last_day_leaves_no_pending_day() {
    let mut plan = fresh_plan(2);
    for n in 1..=2 {
        plan = complete_task(&plan, n);
        plan = complete_day_at(&plan, now()).expect("complete day");
    }

    assert_eq!(plan.count_status(DayStatus::Pending), 0);
    assert!(plan.is_finished());
    assert_eq!(current_day(&plan).unwrap().day_number, 2);
    check_invariants(&plan).expect("finished plan is consistent");

    // Nothing left to complete
    assert!(matches!(
        complete_day(&plan),
        Err(LearnError::Precondition { .. })
    ));
}

#[test]
fn test_complete_day_on_empty_plan_is_invalid() {
    let mut plan = fresh_plan(1);
    plan.days.clear();
    plan.total_days = 0;

    assert!(matches!(
        complete_day(&plan),
        Err(LearnError::InvalidPlan { .. })
    ));
}

#[test]
fn test_complete_day_without_tasks_is_invalid() {
    let mut plan = fresh_plan(2);
    plan.days[0].tasks.clear();

    assert!(matches!(
        complete_day(&plan),
        Err(LearnError::InvalidPlan { .. })
    ));
}

#[test]
fn test_update_task_keeps_statuses() {
    let plan = fresh_plan(2);
    let mut task = plan.days[1].tasks[0].clone();
    task.description = "Rewritten".to_string();

    let updated = update_task(&plan, 2, task).expect("update");
    assert_eq!(updated.days[1].tasks[0].description, "Rewritten");
    assert_eq!(updated.days[0].status, DayStatus::Pending);
    assert_eq!(updated.days[1].status, DayStatus::Locked);
    // Input untouched
    assert_eq!(plan.days[1].tasks[0].description, "Study 2");
}

#[test]
fn test_update_task_unknown_targets() {
    let plan = fresh_plan(1);
    let task = Task::new("nope", "Unknown", 10);

    assert!(matches!(
        update_task(&plan, 1, task.clone()),
        Err(LearnError::TaskNotFound { day_number: 1, .. })
    ));
    assert!(matches!(
        update_task(&plan, 7, task),
        Err(LearnError::DayNotFound { day_number: 7, .. })
    ));
}

#[test]
fn test_update_task_rejects_unverified_completion() {
    let mut plan = fresh_plan(1);
    plan.days[0].tasks[0] = Task::new("q", "Explain borrowing", 20).with_question("What is a borrow?", "A reference");

    let mut task = plan.days[0].tasks[0].clone();
    task.is_completed = true;
    assert!(matches!(
        update_task(&plan, 1, task),
        Err(LearnError::Precondition { .. })
    ));
}

#[test]
fn test_toggle_task_respects_verification_gate() {
    let plain = Task::new("a", "Read", 10);
    let toggled = toggle_task(&plain).expect("toggle plain");
    assert!(toggled.is_completed);
    assert!(!toggle_task(&toggled).expect("untoggle").is_completed);

    let gated = Task::new("b", "Quiz", 10).with_question("2+2?", "4");
    assert!(toggle_task(&gated).is_err());

    let mut verified = gated.clone();
    verified.is_verified = true;
    assert!(toggle_task(&verified).expect("toggle verified").is_completed);
}

#[test]
fn test_record_answer_correct_and_incorrect() {
    let task = Task::new("q", "Lifetimes", 30).with_question("What does 'a mean?", "A lifetime");

    let right = Evaluation {
        correct: true,
        feedback: "Spot on".to_string(),
        source: EvaluationSource::Generator,
    };
    let answered = record_answer(&task, "A lifetime parameter", &right);
    assert!(answered.is_verified);
    assert!(answered.is_completed);
    assert_eq!(answered.user_answer, "A lifetime parameter");
    assert_eq!(answered.ai_feedback.as_deref(), Some("Spot on"));

    let wrong = Evaluation::self_report(false);
    let answered = record_answer(&task, "No idea", &wrong);
    assert!(answered.is_verified);
    assert!(!answered.is_completed);
    assert_eq!(answered.ai_feedback, None);
}

#[test]
fn test_record_answer_replaces_stale_feedback() {
    let task = Task::new("q", "Lifetimes", 30).with_question("What does 'a mean?", "A lifetime");
    let graded = Evaluation {
        correct: false,
        feedback: "Think about scopes".to_string(),
        source: EvaluationSource::Generator,
    };
    let first = record_answer(&task, "A type", &graded);
    assert_eq!(first.ai_feedback.as_deref(), Some("Think about scopes"));

    let second = record_answer(&first, "A scope marker", &Evaluation::self_report(true));
    assert!(second.is_completed);
    assert_eq!(second.ai_feedback, None);
}

#[test]
fn test_only_pending_day_is_open() {
    let plan = fresh_plan(3);
    ensure_day_open(&plan, 1).expect("pending day is open");
    assert!(matches!(
        ensure_day_open(&plan, 2),
        Err(LearnError::Precondition { .. })
    ));
    assert!(matches!(
        ensure_day_open(&plan, 9),
        Err(LearnError::DayNotFound { day_number: 9, .. })
    ));

    let plan = complete_day(&complete_task(&plan, 1)).expect("complete day 1");
    assert!(matches!(
        ensure_day_open(&plan, 1),
        Err(LearnError::Precondition { .. })
    ));
    ensure_day_open(&plan, 2).expect("next day unlocked");
}

#[test]
fn test_record_answer_with_fallback_completes_task() {
    let task = Task::new("q", "Traits", 30).with_question("What is a trait?", "Shared behavior");
    let answered = record_answer(&task, "An interface", &Evaluation::fallback(crate::models::Language::En));

    assert!(answered.is_completed);
    assert!(answered.is_verified);
    assert!(answered.ai_feedback.is_some());
}

#[test]
fn test_update_day_preserves_status() {
    let plan = fresh_plan(2);
    let request = UpdateDayRequest {
        user_notes: Some("Tough one".to_string()),
        mood: Some(Mood::Tired),
        ..Default::default()
    };

    let updated = update_day(&plan, 1, &request).expect("update day");
    assert_eq!(updated.days[0].user_notes.as_deref(), Some("Tough one"));
    assert_eq!(updated.days[0].mood, Some(Mood::Tired));
    assert_eq!(updated.days[0].status, DayStatus::Pending);
}

#[test]
fn test_day_progress_and_can_complete() {
    let mut d = day(
        1,
        DayStatus::Pending,
        vec![Task::new("a", "A", 10), Task::new("b", "B", 10), Task::new("c", "C", 10)],
    );
    assert_eq!(day_progress(&d), 0);
    d.tasks[0].is_completed = true;
    assert_eq!(day_progress(&d), 33);
    assert!(!can_complete(&d));
    for t in &mut d.tasks {
        t.is_completed = true;
    }
    assert_eq!(day_progress(&d), 100);
    assert!(can_complete(&d));

    let empty = day(2, DayStatus::Locked, vec![]);
    assert_eq!(day_progress(&empty), 0);
}

#[test]
fn test_check_invariants_detects_violations() {
    let mut two_pending = fresh_plan(3);
    two_pending.days[1].status = DayStatus::Pending;
    assert!(check_invariants(&two_pending).is_err());

    let mut unlocked_ahead = fresh_plan(3);
    unlocked_ahead.days[2].status = DayStatus::Completed;
    assert!(check_invariants(&unlocked_ahead).is_err());

    let mut stalled = fresh_plan(2);
    stalled.days[0].status = DayStatus::Locked;
    assert!(check_invariants(&stalled).is_err());

    check_invariants(&fresh_plan(3)).expect("fresh plan is consistent");
}

#[test]
fn test_at_most_one_pending_day_through_full_run() {
    let mut plan = fresh_plan(5);
    for n in 1..=5 {
        assert!(plan.count_status(DayStatus::Pending) <= 1);
        plan = complete_task(&plan, n);
        plan = complete_day(&plan).expect("complete");
        check_invariants(&plan).expect("invariants");
    }
    assert_eq!(plan.count_status(DayStatus::Pending), 0);
    assert_eq!(plan.computed_progress(), 100);
}
