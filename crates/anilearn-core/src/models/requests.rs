//! Request types for editing models.

use super::{LearningDay, Mood};

/// Editable fields of a learning day. `None` leaves a field untouched.
///
/// Status, completion date and tasks are not editable here.
#[derive(Debug, Default, Clone)]
pub struct UpdateDayRequest {
    pub topic: Option<String>,
    pub summary: Option<String>,
    pub user_notes: Option<String>,
    pub mood: Option<Mood>,
}

impl UpdateDayRequest {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Names of the fields this request sets, in a fixed order.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        [
            ("topic", self.topic.is_some()),
            ("summary", self.summary.is_some()),
            ("notes", self.user_notes.is_some()),
            ("mood", self.mood.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    /// Applies the set fields to `day`. Blank notes clear the notes.
    pub fn apply_to(&self, day: &mut LearningDay) {
        if let Some(topic) = &self.topic {
            day.topic.clone_from(topic);
        }
        if let Some(summary) = &self.summary {
            day.summary.clone_from(summary);
        }
        if let Some(notes) = &self.user_notes {
            day.user_notes = if notes.trim().is_empty() {
                None
            } else {
                Some(notes.clone())
            };
        }
        if let Some(mood) = self.mood {
            day.mood = Some(mood);
        }
    }
}
