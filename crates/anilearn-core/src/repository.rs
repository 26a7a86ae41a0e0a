//! Durable storage of plans and the plan index.
//!
//! The repository owns two kinds of keys in the [`KeyValueStore`]:
//!
//! - `anilearn_plan_<id>`: the full serialized [`LearningPlan`]
//! - `anilearn_index`: the serialized list of [`LearningPlanMetadata`],
//!   most recently created first
//!
//! Writes are best-effort atomic: the full record is written first, then the
//! index. A crash between the two leaves a record whose index entry is stale
//! or missing; the next save of that plan repairs it.

use log::{debug, info, warn};

use crate::{
    error::{LearnError, Result},
    models::{LearningPlan, LearningPlanMetadata, Preferences},
    store::KeyValueStore,
};

pub const INDEX_KEY: &str = "anilearn_index";
pub const PLAN_PREFIX: &str = "anilearn_plan_";
pub const PREFERENCES_KEY: &str = "anilearn_preferences";
pub const SCHEMA_VERSION_KEY: &str = "anilearn_schema_version";

/// Version stamped on the stored data layout.
pub const SCHEMA_VERSION: u32 = 1;

/// Storage key of a plan's full record.
pub fn plan_key(id: &str) -> String {
    format!("{PLAN_PREFIX}{id}")
}

/// Reads and writes plans and their metadata index.
pub struct PlanRepository<S> {
    store: S,
}

impl<S: KeyValueStore> PlanRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Checks the stored schema version, stamping unversioned data as the
    /// current version.
    ///
    /// # Errors
    ///
    /// Returns `LearnError::UnsupportedSchema` when the data was written by a
    /// newer layout.
    pub fn ensure_schema(&self) -> Result<u32> {
        match self.store.get(SCHEMA_VERSION_KEY)? {
            None => {
                debug!("No schema version stored, stamping version {SCHEMA_VERSION}");
                self.store
                    .set(SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_string())?;
                Ok(SCHEMA_VERSION)
            }
            Some(raw) => {
                let found = raw.trim().parse::<u32>().map_err(|_| LearnError::Configuration {
                    message: format!("Stored schema version '{raw}' is not a number"),
                })?;
                if found > SCHEMA_VERSION {
                    return Err(LearnError::UnsupportedSchema {
                        found,
                        supported: SCHEMA_VERSION,
                    });
                }
                Ok(found)
            }
        }
    }

    /// Writes the full plan and upserts its index entry.
    ///
    /// `progress` is recomputed from the task list before writing. An existing
    /// index entry is replaced in place; a new one goes to the front. Returns
    /// the plan exactly as stored.
    ///
    /// # Errors
    ///
    /// Returns `LearnError::InvalidPlan` for a malformed plan (nothing is
    /// written), or a store/parse error from either write.
    pub fn save(&self, plan: &LearningPlan) -> Result<LearningPlan> {
        plan.validate_shape()?;

        let mut stored = plan.clone();
        stored.progress = stored.computed_progress();

        let body = serde_json::to_string(&stored)?;
        self.store.set(&plan_key(&stored.id), &body)?;

        let metadata = LearningPlanMetadata::from(&stored);
        let mut index = self.load_index()?;
        match index.iter_mut().find(|entry| entry.id == metadata.id) {
            Some(entry) => *entry = metadata,
            None => index.insert(0, metadata),
        }
        self.write_index(&index)?;

        debug!("Saved plan {} (progress {}%)", stored.id, stored.progress);
        Ok(stored)
    }

    /// Returns the metadata entries in index order; empty when none exist.
    ///
    /// # Errors
    ///
    /// Returns `LearnError::Parse` when the stored index is corrupt.
    pub fn load_index(&self) -> Result<Vec<LearningPlanMetadata>> {
        match self.store.get(INDEX_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| LearnError::Parse {
                key: INDEX_KEY.to_string(),
                source,
            }),
        }
    }

    /// Returns the full plan for `id`.
    ///
    /// # Errors
    ///
    /// Returns `LearnError::NotFound` when the record is absent or does not
    /// parse into a well-formed plan.
    pub fn load(&self, id: &str) -> Result<LearningPlan> {
        let key = plan_key(id);
        let raw = self
            .store
            .get(&key)?
            .ok_or_else(|| LearnError::NotFound { id: id.to_string() })?;

        let plan: LearningPlan = match serde_json::from_str(&raw) {
            Ok(plan) => plan,
            Err(e) => {
                warn!("Stored plan '{key}' failed to parse: {e}");
                return Err(LearnError::NotFound { id: id.to_string() });
            }
        };
        if let Err(e) = plan.validate_shape() {
            warn!("Stored plan '{key}' is malformed: {e}");
            return Err(LearnError::NotFound { id: id.to_string() });
        }
        Ok(plan)
    }

    /// Removes the full record and its index entry. Deleting an absent id is
    /// a no-op.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(&plan_key(id))?;

        let mut index = self.load_index()?;
        let before = index.len();
        index.retain(|entry| entry.id != id);
        if index.len() != before {
            self.write_index(&index)?;
            info!("Deleted plan {id}");
        }
        Ok(())
    }

    /// Loads preferences, falling back to defaults when none are stored.
    ///
    /// # Errors
    ///
    /// Returns `LearnError::Parse` when stored preferences are corrupt.
    pub fn load_preferences(&self) -> Result<Preferences> {
        match self.store.get(PREFERENCES_KEY)? {
            None => Ok(Preferences::default()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| LearnError::Parse {
                key: PREFERENCES_KEY.to_string(),
                source,
            }),
        }
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        let body = serde_json::to_string(preferences)?;
        self.store.set(PREFERENCES_KEY, &body)
    }

    fn write_index(&self, index: &[LearningPlanMetadata]) -> Result<()> {
        let body = serde_json::to_string(index)?;
        self.store.set(INDEX_KEY, &body)
    }
}
