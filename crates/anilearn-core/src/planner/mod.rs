//! High-level planner API over storage, progression and generation.
//!
//! [`Planner`] is the entry point for every interface. It owns the shared
//! key-value store, the optional plan generator and the session language,
//! and exposes async operations that take parameter structs from
//! [`crate::params`].
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Planner     │    │  progression/   │    │ PlanRepository  │
//! │ (plan_ops,      │───▶│  generator      │───▶│ (KeyValueStore) │
//! │  day_ops)       │    │  (pure / async) │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Storage access is synchronous and runs on blocking worker threads through
//! [`Planner::with_repository`]. Generator calls run on the async runtime and
//! never hold a store lock.
//!
//! ## Submodules
//!
//! - [`builder`]: configures and opens a [`Planner`]
//! - [`plan_ops`]: plan lifecycle, dashboard, import/export and preferences
//! - [`day_ops`]: day and task progression
//! - [`recap`]: background recap generation after a completed day
//!
//! # Usage
//!
//! ```rust
//! use anilearn_core::{params::PlanId, store::MemoryStore, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_store(MemoryStore::new())
//!     .build()
//!     .await?;
//!
//! let index = planner.list_plans().await?;
//! assert!(index.is_empty());
//!
//! let missing = planner.get_plan(&PlanId { id: "nope".to_string() }).await;
//! assert!(missing.unwrap_err().is_not_found());
//! # Ok(())
//! # }
//! ```

use std::{sync::Arc, time::Duration};

use tokio::task;

use crate::{
    error::{LearnError, Result},
    generator::PlanGenerator,
    models::Language,
    repository::PlanRepository,
    store::KeyValueStore,
};

pub mod builder;
pub mod day_ops;
pub mod plan_ops;
pub mod recap;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;
pub use recap::PendingRecap;

/// Repository type used by the planner.
pub type SharedRepository = PlanRepository<Arc<dyn KeyValueStore>>;

/// Main planner interface for managing learning plans.
pub struct Planner {
    pub(crate) store: Arc<dyn KeyValueStore>,
    pub(crate) generator: Option<Arc<dyn PlanGenerator>>,
    /// Session language overriding the stored preference
    pub(crate) language: Option<Language>,
    /// Upper bound for answer evaluation before the lenient fallback
    pub(crate) timeout: Option<Duration>,
}

impl Planner {
    pub(crate) fn new(
        store: Arc<dyn KeyValueStore>,
        generator: Option<Arc<dyn PlanGenerator>>,
        language: Option<Language>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            store,
            generator,
            language,
            timeout,
        }
    }

    /// True when a plan generator is configured.
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Runs `f` against the repository on a blocking worker thread.
    pub(crate) async fn with_repository<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&SharedRepository) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let repository = PlanRepository::new(Arc::clone(&self.store));
        task::spawn_blocking(move || f(&repository))
            .await
            .map_err(|e| LearnError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }

    /// Language for generated content: the session override, else the
    /// stored preference.
    pub async fn language(&self) -> Result<Language> {
        if let Some(language) = self.language {
            return Ok(language);
        }
        self.with_repository(|repo| Ok(repo.load_preferences()?.language))
            .await
    }
}
