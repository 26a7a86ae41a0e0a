//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::LearningPlanMetadata;

/// Newtype wrapper for displaying the plan index.
///
/// ```rust
/// use anilearn_core::{display::PlanIndex, models::LearningPlanMetadata};
/// use jiff::Timestamp;
///
/// let entry = LearningPlanMetadata {
///     id: "4f1c".to_string(),
///     title: "Rust".to_string(),
///     topic: "Rust".to_string(),
///     total_days: 14,
///     created_at: Timestamp::now(),
///     progress: 25,
/// };
/// let output = PlanIndex(vec![entry]).to_string();
/// assert!(output.contains("Rust"));
/// assert!(output.contains("25%"));
/// ```
pub struct PlanIndex(pub Vec<LearningPlanMetadata>);

impl PlanIndex {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&LearningPlanMetadata> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LearningPlanMetadata> {
        self.0.iter()
    }
}

impl Index<usize> for PlanIndex {
    type Output = LearningPlanMetadata;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanIndex {
    type Item = LearningPlanMetadata;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanIndex {
    type Item = &'a LearningPlanMetadata;
    type IntoIter = std::slice::Iter<'a, LearningPlanMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for entry in &self.0 {
                write!(f, "{entry}")?;
            }
            Ok(())
        }
    }
}
