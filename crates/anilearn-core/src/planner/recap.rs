//! Background recap generation after a completed day.

use std::sync::Arc;

use log::warn;
use tokio::task::JoinHandle;

use crate::{
    generator::{recap_or_fallback, PlanGenerator},
    models::{Language, LearningDay, Recap},
};

/// Recap for a just-completed day, generated off the completion path.
///
/// The day is already persisted when this value exists; waiting on it only
/// affects what is shown, never stored state. Dropping it detaches the
/// generation task.
pub struct PendingRecap {
    handle: Option<JoinHandle<Recap>>,
    language: Language,
}

impl PendingRecap {
    /// Starts generating a recap for `day` on the runtime.
    pub(crate) fn spawn(
        generator: Arc<dyn PlanGenerator>,
        day: LearningDay,
        language: Language,
    ) -> Self {
        let handle =
            tokio::spawn(async move { recap_or_fallback(generator.as_ref(), &day, language).await });
        Self {
            handle: Some(handle),
            language,
        }
    }

    /// A recap that resolves straight to the fixed default.
    pub(crate) fn fallback(language: Language) -> Self {
        Self {
            handle: None,
            language,
        }
    }

    /// True when a generator is producing this recap.
    pub fn is_generated(&self) -> bool {
        self.handle.is_some()
    }

    /// Waits for the recap, substituting the default if the task failed.
    pub async fn wait(self) -> Recap {
        let Some(handle) = self.handle else {
            return Recap::fallback(self.language);
        };
        match handle.await {
            Ok(recap) => recap,
            Err(e) => {
                warn!("Recap task failed: {e}");
                Recap::fallback(self.language)
            }
        }
    }
}
