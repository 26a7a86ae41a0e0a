//! Builder for creating and configuring Planner instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use log::debug;
use tokio::task;

use super::Planner;
use crate::{
    error::{LearnError, Result},
    generator::PlanGenerator,
    models::Language,
    repository::PlanRepository,
    store::{KeyValueStore, SqliteStore},
};

/// Builder for creating and configuring Planner instances.
#[derive(Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    store: Option<Arc<dyn KeyValueStore>>,
    generator: Option<Arc<dyn PlanGenerator>>,
    language: Option<Language>,
    timeout: Option<Duration>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/anilearn/anilearn.db` or
    /// `~/.local/share/anilearn/anilearn.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses an already-open store instead of the SQLite database.
    pub fn with_store<S: KeyValueStore + 'static>(mut self, store: S) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    pub fn with_generator<G: PlanGenerator + 'static>(mut self, generator: G) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Overrides the stored language preference for this session.
    pub fn with_language(mut self, language: Option<Language>) -> Self {
        self.language = language;
        self
    }

    /// Bounds how long answer evaluation may take. An evaluation that runs
    /// longer is replaced by the lenient fallback verdict.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `LearnError::FileSystem` if the database directory cannot be
    /// created, `LearnError::Store` if the database cannot be opened, and
    /// `LearnError::UnsupportedSchema` for data written by a newer version.
    pub async fn build(self) -> Result<Planner> {
        let store = match self.store {
            Some(store) => store,
            None => {
                let db_path = match self.database_path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };
                Self::open_sqlite(db_path).await?
            }
        };

        let schema_store = Arc::clone(&store);
        let version = task::spawn_blocking(move || PlanRepository::new(schema_store).ensure_schema())
            .await
            .map_err(|e| LearnError::Configuration {
                message: format!("Task join error: {e}"),
            })??;
        debug!("Storage schema version {version}");

        Ok(Planner::new(store, self.generator, self.language, self.timeout))
    }

    async fn open_sqlite(db_path: PathBuf) -> Result<Arc<dyn KeyValueStore>> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| LearnError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Opening database at {}", db_path.display());
        let store = task::spawn_blocking(move || SqliteStore::open(&db_path))
            .await
            .map_err(|e| LearnError::Configuration {
                message: format!("Task join error: {e}"),
            })??;
        Ok(Arc::new(store))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("anilearn")
            .place_data_file("anilearn.db")
            .map_err(|e| LearnError::XdgDirectory(e.to_string()))
    }
}
