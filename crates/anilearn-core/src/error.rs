//! Error types for the learning planner library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum LearnError {
    /// Key-value store I/O errors
    #[error("Store error: {message}")]
    Store {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    NotFound { id: String },
    /// Day number outside the plan
    #[error("Day {day_number} not found in plan {plan_id}")]
    DayNotFound { plan_id: String, day_number: u32 },
    /// Task not found within a day
    #[error("Task '{task_id}' not found in day {day_number}")]
    TaskNotFound { day_number: u32, task_id: String },
    /// Stored value is not valid JSON or does not have the expected shape
    #[error("Failed to parse stored value '{key}': {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// Operation attempted before its precondition holds
    #[error("Precondition failed: {message}")]
    Precondition { message: String },
    /// Structurally empty or malformed plan
    #[error("Invalid plan: {reason}")]
    InvalidPlan { reason: String },
    /// External plan generation failed or returned unusable content
    #[error("Plan generation failed: {message}")]
    Generation { message: String },
    /// Stored data written by a newer version
    #[error("Unsupported schema version {found} (supported: {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization errors when writing values
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating store errors with optional context.
pub struct StoreErrorBuilder {
    message: String,
}

impl StoreErrorBuilder {
    /// Create a new store error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> LearnError {
        LearnError::Store {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> LearnError {
        LearnError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl LearnError {
    /// Creates a builder for store errors.
    pub fn store(message: impl Into<String>) -> StoreErrorBuilder {
        StoreErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_plan(reason: impl Into<String>) -> Self {
        Self::InvalidPlan {
            reason: reason.into(),
        }
    }

    pub(crate) fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Returns true for the "plan does not exist" signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Specialized extension trait for store-related Results.
pub trait StoreResultExt<T> {
    /// Map SQLite errors with a message.
    fn store_context(self, message: &str) -> Result<T>;
}

impl<T> StoreResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn store_context(self, message: &str) -> Result<T> {
        self.map_err(|e| LearnError::store(message).with_source(e))
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, LearnError>;
