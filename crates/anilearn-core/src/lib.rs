//! Core library for the AniLearn learning planner.
//!
//! A learning plan is a multi-day curriculum of ordered days, each holding
//! tasks. Exactly one day is the current (`PENDING`) day; finishing all of its
//! tasks lets the learner complete it, which unlocks the next. Tasks may carry
//! a verification question that has to be answered before they count as done.
//!
//! The crate is layered:
//!
//! - [`store`]: the [`KeyValueStore`] seam and its SQLite and in-memory
//!   backends
//! - [`repository`]: JSON persistence of plans, the plan index and preferences
//! - [`progression`]: pure day and task state transitions
//! - [`generator`]: the [`PlanGenerator`] seam, plan assembly and fallbacks
//! - [`planner`]: the async [`Planner`] facade used by interfaces
//! - [`models`] and [`display`]: data types and their Markdown rendering
//!
//! # Quick Start
//!
//! ```rust
//! use anilearn_core::{store::MemoryStore, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_store(MemoryStore::new())
//!     .build()
//!     .await?;
//!
//! let plans = planner.list_plans().await?;
//! println!("{plans}");
//!
//! let prefs = planner.toggle_theme().await?;
//! println!("{prefs}");
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod error;
pub mod generator;
pub mod models;
pub mod params;
pub mod planner;
pub mod progression;
pub mod repository;
pub mod store;

// Re-export commonly used types
pub use display::{
    AnswerResult, CompletionResult, CreateResult, DeleteResult, LocalDateTime, OperationStatus,
    PlanIndex, UpdateResult,
};
pub use error::{LearnError, Result};
pub use generator::{GeminiConfig, GeminiGenerator, PlanGenerator, PlanRequest};
pub use models::{
    DashboardStats, DayStatus, Language, LearningDay, LearningPlan, LearningPlanMetadata,
    Preferences, Recap, Task, Theme,
};
pub use params::{AnswerTask, CreatePlan, DayRef, PlanId, TaskRef, UpdateDay};
pub use planner::{PendingRecap, Planner, PlannerBuilder};
pub use repository::PlanRepository;
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
