//! Data models for learning plans, days and tasks.
//!
//! This module contains the core domain models of the planner. Display
//! implementations for these models are located in [`crate::display::models`]
//! to keep presentation apart from the data structures.
//!
//! All persisted models serialize with camelCase field names, so a stored
//! plan reads as plain JSON:
//!
//! ```rust
//! use anilearn_core::models::{DayStatus, LearningDay, Task};
//!
//! let day = LearningDay {
//!     day_number: 1,
//!     topic: "Ownership".to_string(),
//!     summary: "Moves, borrows and lifetimes".to_string(),
//!     tasks: vec![Task::new("t1", "Read chapter 4", 45)],
//!     status: DayStatus::Pending,
//!     user_notes: None,
//!     completion_date: None,
//!     mood: None,
//! };
//! let json = serde_json::to_string(&day).unwrap();
//! assert!(json.contains("\"dayNumber\":1"));
//! assert!(json.contains("\"status\":\"PENDING\""));
//! ```

pub mod day;
pub mod metadata;
pub mod plan;
pub mod preferences;
pub mod recap;
pub mod requests;
pub mod stats;
pub mod status;
pub mod task;


pub use day::LearningDay;
pub use metadata::LearningPlanMetadata;
pub use plan::LearningPlan;
pub use preferences::Preferences;
pub use recap::{Evaluation, EvaluationSource, Recap, RecapExtension};
pub use requests::UpdateDayRequest;
pub use stats::{DashboardStats, DayProgress};
pub use status::{DayStatus, Language, Mood, Theme};
pub use task::{Task, TaskLink};
