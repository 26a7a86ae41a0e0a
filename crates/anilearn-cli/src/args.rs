use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    ConfigCommands, DayCommands, LanguageArg, PlanCommands, PlanIdArgs, TaskCommands,
};

/// Study planner that turns a topic into a day-by-day learning plan
///
/// AniLearn asks a generative tutor for a multi-day curriculum, then tracks
/// progress one day at a time: finish every task of the current day to unlock
/// the next. Some tasks carry a short question that must be answered before
/// they count as done.
///
/// Plan generation needs GEMINI_API_KEY (or API_KEY) in the environment.
/// Everything else works offline.
#[derive(Parser)]
#[command(version, about, name = "anilearn")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/anilearn/anilearn.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Language for generated content, overriding the saved preference
    #[arg(long, global = true, value_enum)]
    pub language: Option<LanguageArg>,

    /// Gemini model used for generation
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Seconds to wait for the generator before giving up
    #[arg(long, global = true, default_value_t = 120)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the AniLearn CLI
///
/// Without a command, the plan list is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage learning plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// View, edit and complete days
    #[command(alias = "d")]
    Day {
        #[command(subcommand)]
        command: DayCommands,
    },
    /// Complete and answer tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show progress statistics for a plan
    Dashboard(PlanIdArgs),
    /// Show or change preferences
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}
