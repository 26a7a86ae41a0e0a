//! Display formatting for domain models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly and render Markdown.
//! Collections and operation outcomes go through newtype wrappers so each
//! context can choose its own framing.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │   Wrappers &    │    │    Markdown     │
//! │ (Plan, Day, ..) │───▶│  Result Types   │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: collection wrappers ([`PlanIndex`])
//! - [`results`]: operation results ([`CreateResult`], [`UpdateResult`],
//!   [`DeleteResult`], [`CompletionResult`], [`AnswerResult`])
//! - [`status`]: confirmation messages ([`OperationStatus`])
//! - [`datetime`]: local date/time formatting
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use anilearn_core::display::{OperationStatus, PlanIndex};
//!
//! assert_eq!(PlanIndex(vec![]).to_string(), "No plans found.\n");
//!
//! let status = OperationStatus::success("Theme set to dark");
//! assert!(status.to_string().contains("dark"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::PlanIndex;
pub use datetime::{LocalDate, LocalDateTime};
pub use results::{AnswerResult, CompletionResult, CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
