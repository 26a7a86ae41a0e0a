//! Status and tag enumerations for days and preferences.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a learning day.
///
/// Days move strictly forward: `Locked` → `Pending` → `Completed`. `Skipped`
/// is part of the stored format but no core operation transitions into it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayStatus {
    /// Not yet reachable
    Locked,

    /// The current day
    Pending,

    /// Finished, all tasks done
    Completed,

    /// Passed over by a manual override
    Skipped,
}

impl FromStr for DayStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "locked" => Ok(DayStatus::Locked),
            "pending" => Ok(DayStatus::Pending),
            "completed" | "done" => Ok(DayStatus::Completed),
            "skipped" => Ok(DayStatus::Skipped),
            _ => Err(format!("Invalid day status: {s}")),
        }
    }
}

impl DayStatus {
    /// Stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Locked => "LOCKED",
            DayStatus::Pending => "PENDING",
            DayStatus::Completed => "COMPLETED",
            DayStatus::Skipped => "SKIPPED",
        }
    }

    /// True for days that count as behind the current day.
    pub fn is_closed(&self) -> bool {
        matches!(self, DayStatus::Completed | DayStatus::Skipped)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use anilearn_core::models::DayStatus;
    ///
    /// assert_eq!(DayStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(DayStatus::Pending.with_icon(), "➤ Pending");
    /// assert_eq!(DayStatus::Locked.with_icon(), "🔒 Locked");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            DayStatus::Completed => "✓ Completed",
            DayStatus::Pending => "➤ Pending",
            DayStatus::Locked => "🔒 Locked",
            DayStatus::Skipped => "↷ Skipped",
        }
    }
}

/// How the learner felt about a day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Tired,
    Confused,
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "neutral" => Ok(Mood::Neutral),
            "tired" => Ok(Mood::Tired),
            "confused" => Ok(Mood::Confused),
            _ => Err(format!("Invalid mood: {s}")),
        }
    }
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Tired => "tired",
            Mood::Confused => "confused",
        }
    }
}

/// Language tag passed to the plan generator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Zh,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "zh" | "chinese" => Ok(Language::Zh),
            _ => Err(format!("Invalid language: {s}")),
        }
    }
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Instruction appended to generator prompts.
    pub fn instruction(&self) -> &'static str {
        match self {
            Language::En => "Respond in English.",
            Language::Zh => "Respond in Chinese (Simplified).",
        }
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Invalid theme: {s}")),
        }
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
