//! Plan metadata projection used by the plan index.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::LearningPlan;

/// Lightweight projection of a [`LearningPlan`] without its days or context.
///
/// Always re-derivable from the full plan; the repository rewrites it on
/// every save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LearningPlanMetadata {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub total_days: u32,
    pub created_at: Timestamp,
    /// Percentage of completed tasks (0-100)
    pub progress: u8,
}

impl From<&LearningPlan> for LearningPlanMetadata {
    fn from(plan: &LearningPlan) -> Self {
        Self {
            id: plan.id.clone(),
            title: plan.title.clone(),
            topic: plan.topic.clone(),
            total_days: plan.total_days,
            created_at: plan.created_at,
            progress: plan.computed_progress(),
        }
    }
}
