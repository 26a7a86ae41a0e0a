//! Plan operations for the Planner.

use log::info;

use super::Planner;
use crate::{
    display::PlanIndex,
    error::{LearnError, Result},
    generator,
    models::{DashboardStats, Language, LearningPlan, LearningPlanMetadata, Preferences, Theme},
    params::{CreatePlan, PlanId},
    progression,
};

impl Planner {
    /// Generates a new plan and stores it at the front of the index.
    ///
    /// Nothing is written unless generation succeeds.
    ///
    /// # Errors
    ///
    /// - `LearnError::Configuration` when no generator is configured
    /// - `LearnError::InvalidInput` for a blank topic or bad day count
    /// - `LearnError::Generation` when the service fails or returns an
    ///   unusable plan
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<LearningPlan> {
        let generator = self.generator.clone().ok_or_else(|| LearnError::Configuration {
            message: "No plan generator configured; set GEMINI_API_KEY".to_string(),
        })?;
        let language = self.language().await?;
        let request = params.to_request(language)?;

        let plan = generator::generate_plan(generator.as_ref(), &request).await?;
        self.with_repository(move |repo| repo.save(&plan)).await
    }

    /// Returns the plan index, most recently created first.
    pub async fn list_plans(&self) -> Result<PlanIndex> {
        let entries = self.with_repository(|repo| repo.load_index()).await?;
        Ok(PlanIndex(entries))
    }

    /// Retrieves a full plan.
    ///
    /// # Errors
    ///
    /// Returns `LearnError::NotFound` when the plan is absent or unreadable.
    pub async fn get_plan(&self, params: &PlanId) -> Result<LearningPlan> {
        let id = params.id.clone();
        self.with_repository(move |repo| repo.load(&id)).await
    }

    /// Permanently deletes a plan.
    ///
    /// Returns the removed index entry, or `None` when no such plan existed.
    pub async fn delete_plan(&self, params: &PlanId) -> Result<Option<LearningPlanMetadata>> {
        let id = params.id.clone();
        self.with_repository(move |repo| {
            let entry = repo.load_index()?.into_iter().find(|entry| entry.id == id);
            repo.delete(&id)?;
            Ok(entry)
        })
        .await
    }

    /// Serializes a stored plan as pretty-printed JSON.
    pub async fn export_plan(&self, params: &PlanId) -> Result<String> {
        let plan = self.get_plan(params).await?;
        Ok(serde_json::to_string_pretty(&plan)?)
    }

    /// Stores a plan read from JSON, replacing any plan with the same id.
    ///
    /// # Errors
    ///
    /// - `LearnError::InvalidInput` when the text is not a plan document
    /// - `LearnError::InvalidPlan` when the plan is malformed or its day
    ///   statuses are inconsistent
    pub async fn import_plan(&self, json: &str) -> Result<LearningPlan> {
        let plan: LearningPlan = serde_json::from_str(json).map_err(|e| {
            LearnError::invalid_input("plan").with_reason(format!("Not a plan document: {e}"))
        })?;
        plan.validate_shape()?;
        progression::check_invariants(&plan)?;

        let stored = self.with_repository(move |repo| repo.save(&plan)).await?;
        info!("Imported plan {} ({} days)", stored.id, stored.total_days);
        Ok(stored)
    }

    /// Progress statistics for one plan.
    pub async fn dashboard(&self, params: &PlanId) -> Result<DashboardStats> {
        let plan = self.get_plan(params).await?;
        Ok(DashboardStats::from_plan(&plan))
    }

    /// Stored preferences, defaults when none were saved.
    pub async fn preferences(&self) -> Result<Preferences> {
        self.with_repository(|repo| repo.load_preferences()).await
    }

    pub async fn set_language(&self, language: Language) -> Result<Preferences> {
        self.update_preferences(move |prefs| prefs.with_language(language))
            .await
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<Preferences> {
        self.update_preferences(move |prefs| prefs.with_theme(theme))
            .await
    }

    /// Switches between the light and dark theme.
    pub async fn toggle_theme(&self) -> Result<Preferences> {
        self.update_preferences(|prefs| prefs.with_theme(prefs.theme.toggled()))
            .await
    }

    async fn update_preferences<F>(&self, f: F) -> Result<Preferences>
    where
        F: FnOnce(Preferences) -> Preferences + Send + 'static,
    {
        self.with_repository(move |repo| {
            let updated = f(repo.load_preferences()?);
            repo.save_preferences(&updated)?;
            Ok(updated)
        })
        .await
    }
}
