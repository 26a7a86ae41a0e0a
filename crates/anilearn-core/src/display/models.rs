//! Display implementations for domain models.
//!
//! Every implementation renders Markdown, meant to be passed through a
//! terminal Markdown renderer. Status icons come from
//! [`DayStatus::with_icon`].

use std::fmt;

use super::datetime::{LocalDate, LocalDateTime};
use crate::{
    models::{
        DashboardStats, DayStatus, Evaluation, EvaluationSource, Language, LearningDay,
        LearningPlan, LearningPlanMetadata, Mood, Preferences, Recap, Task, Theme,
    },
    progression::day_progress,
};

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Preferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **Language**: {}", self.language)?;
        writeln!(f, "- **Theme**: {}", self.theme)
    }
}

impl fmt::Display for LearningPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Topic: {}", self.topic)?;
        writeln!(f, "- Days: {}", self.total_days)?;
        writeln!(f, "- Progress: {}%", self.progress)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;

        if let Some(context) = &self.context {
            writeln!(f)?;
            writeln!(f, "{context}")?;
        }

        if self.days.is_empty() {
            return writeln!(f, "\nNo days in this plan.");
        }

        // Roadmap: one line per day, details live in the day view
        writeln!(f, "\n## Roadmap")?;
        writeln!(f)?;
        for day in &self.days {
            write!(
                f,
                "- Day {}: {} ({}, {}/{} tasks)",
                day.day_number,
                day.topic,
                day.status.with_icon(),
                day.completed_tasks(),
                day.tasks.len()
            )?;
            if let Some(date) = &day.completion_date {
                write!(f, " on {}", LocalDate(date))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for LearningDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## Day {}: {} ({})",
            self.day_number,
            self.topic,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        if !self.summary.is_empty() {
            writeln!(f, "{}", self.summary)?;
            writeln!(f)?;
        }

        writeln!(
            f,
            "- Progress: {}% ({}/{} tasks)",
            day_progress(self),
            self.completed_tasks(),
            self.tasks.len()
        )?;
        if let Some(mood) = self.mood {
            writeln!(f, "- Mood: {mood}")?;
        }
        if let Some(date) = &self.completion_date {
            writeln!(f, "- Completed: {}", LocalDateTime(date))?;
        }
        writeln!(f)?;

        if let Some(notes) = &self.user_notes {
            writeln!(f, "### Notes")?;
            writeln!(f)?;
            writeln!(f, "{notes}")?;
            writeln!(f)?;
        }

        if self.tasks.is_empty() {
            return writeln!(f, "No tasks for this day.");
        }
        for task in &self.tasks {
            write!(f, "{task}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_completed { "x" } else { " " };
        writeln!(
            f,
            "### [{mark}] {} ({} min, ID: {})",
            self.description, self.estimated_minutes, self.id
        )?;
        writeln!(f)?;

        if !self.links.is_empty() {
            for link in &self.links {
                writeln!(f, "- [{}]({})", link.label, link.url)?;
            }
            writeln!(f)?;
        }

        if let Some(question) = self.verification_question.as_deref().filter(|_| self.is_gated()) {
            writeln!(f, "#### Check")?;
            writeln!(f)?;
            writeln!(f, "{question}")?;
            writeln!(f)?;
            if self.is_verified {
                writeln!(f, "- Your answer: {}", self.user_answer)?;
                if let Some(feedback) = &self.ai_feedback {
                    writeln!(f, "- Feedback: {feedback}")?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for LearningPlanMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {}) {}%", self.title, self.id, self.progress)?;
        writeln!(f)?;
        writeln!(f, "- **Topic**: {}", self.topic)?;
        writeln!(f, "- **Days**: {}", self.total_days)?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Recap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Recap")?;
        writeln!(f)?;
        writeln!(f, "{}", self.summary)?;

        if !self.extensions.is_empty() {
            writeln!(f)?;
            writeln!(f, "### Going further")?;
            writeln!(f)?;
            for ext in &self.extensions {
                writeln!(f, "- [{}]({}): {}", ext.title, ext.url, ext.description)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.correct { "Correct" } else { "Not quite" };
        match self.source {
            EvaluationSource::SelfReport => writeln!(f, "{verdict} (self-reported)")?,
            _ => writeln!(f, "{verdict}")?,
        }
        if !self.feedback.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.feedback)?;
        }
        Ok(())
    }
}

impl fmt::Display for DashboardStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.plan_title)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Completion: {}% ({}/{} days)",
            self.completion_percent, self.completed_days, self.total_days
        )?;
        writeln!(f, "- Time invested: {:.1} h", self.hours_invested())?;

        if !self.days.is_empty() {
            writeln!(f, "\n## Daily progress")?;
            writeln!(f)?;
            writeln!(f, "| Day | Topic | Tasks |")?;
            writeln!(f, "|:-:|:-|:-:|")?;
            for day in &self.days {
                let mark = if day.completed { " ✓" } else { "" };
                writeln!(
                    f,
                    "| {} | {} | {}/{}{mark} |",
                    day.day_number, day.topic, day.completed_tasks, day.total_tasks
                )?;
            }
        }

        writeln!(f, "\n## Up next")?;
        writeln!(f)?;
        if self.upcoming.is_empty() {
            writeln!(f, "All days completed.")?;
        } else {
            for day in &self.upcoming {
                writeln!(f, "- Day {}: {}", day.day_number, day.topic)?;
            }
        }
        Ok(())
    }
}
