//! Command definitions and handlers.
//!
//! Each command has a clap argument struct that converts into a core
//! parameter type from [`anilearn_core::params`], keeping clap out of the
//! core crate:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```
//!
//! [`Cli`] runs the commands against a [`Planner`] and renders the Markdown
//! output of the core display types.

use std::{future::Future, path::PathBuf, time::Duration};

use anilearn_core::{
    display::{CreateResult, DeleteResult, OperationStatus},
    models::{Language, Recap, Theme},
    params::{AnswerTask, CreatePlan, DayRef, PlanId, TaskRef, UpdateDay},
    Planner,
};
use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use log::{debug, info};

use crate::renderer::TerminalRenderer;

// ============================================================================
// CLI Argument Wrapper Implementations
// ============================================================================

/// Generate a new learning plan
#[derive(Args)]
pub struct CreatePlanArgs {
    /// What you want to learn
    pub topic: String,
    #[arg(
        short,
        long,
        help = "Background, goals and constraints to tailor the plan"
    )]
    pub context: Option<String>,
    #[arg(short, long, help = "Plan length in days (1-60, default 14)")]
    pub days: Option<u32>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            topic: val.topic,
            context: val.context,
            total_days: val.days,
        }
    }
}

/// Arguments naming a single plan
#[derive(Args)]
pub struct PlanIdArgs {
    #[arg(help = "Identifier of the plan")]
    pub id: String,
}

impl From<PlanIdArgs> for PlanId {
    fn from(val: PlanIdArgs) -> Self {
        PlanId { id: val.id }
    }
}

/// Export a plan as JSON
#[derive(Args)]
pub struct ExportPlanArgs {
    #[arg(help = "Identifier of the plan to export")]
    pub id: String,
    #[arg(short, long, help = "Write to this file instead of standard output")]
    pub output: Option<PathBuf>,
}

/// Import a plan from a JSON file
#[derive(Args)]
pub struct ImportPlanArgs {
    #[arg(help = "JSON file produced by 'plan export'")]
    pub file: PathBuf,
}

/// Show one day of a plan
#[derive(Args)]
pub struct DayArgs {
    #[arg(help = "Identifier of the plan")]
    pub plan_id: String,
    #[arg(short, long, help = "Day number; defaults to the current day")]
    pub day: Option<u32>,
}

impl From<DayArgs> for DayRef {
    fn from(val: DayArgs) -> Self {
        DayRef {
            plan_id: val.plan_id,
            day_number: val.day,
        }
    }
}

/// Edit a day's notes, mood, topic or summary
#[derive(Args)]
pub struct UpdateDayArgs {
    #[command(flatten)]
    pub day: DayArgs,
    #[arg(short, long, help = "Notes for the day; an empty value clears them")]
    pub notes: Option<String>,
    #[arg(short, long, value_enum, help = "How the day felt")]
    pub mood: Option<MoodArg>,
    #[arg(long, help = "Replace the day's topic")]
    pub topic: Option<String>,
    #[arg(long, help = "Replace the day's summary")]
    pub summary: Option<String>,
}

impl From<UpdateDayArgs> for UpdateDay {
    fn from(val: UpdateDayArgs) -> Self {
        UpdateDay {
            day: val.day.into(),
            topic: val.topic,
            summary: val.summary,
            notes: val.notes,
            mood: val.mood.map(|m| m.to_string()),
        }
    }
}

/// Arguments naming a single task
#[derive(Args)]
pub struct TaskArgs {
    #[arg(help = "Identifier of the plan")]
    pub plan_id: String,
    #[arg(help = "Identifier of the task")]
    pub task_id: String,
    #[arg(short, long, help = "Day holding the task; defaults to the current day")]
    pub day: Option<u32>,
}

impl From<TaskArgs> for TaskRef {
    fn from(val: TaskArgs) -> Self {
        TaskRef {
            plan_id: val.plan_id,
            day_number: val.day,
            task_id: val.task_id,
        }
    }
}

/// Answer a task's verification question
///
/// The answer is judged by the tutor. Without an API key, state the verdict
/// yourself with --correct or --incorrect.
#[derive(Args)]
pub struct AnswerTaskArgs {
    #[command(flatten)]
    pub task: TaskArgs,
    #[arg(help = "Your answer")]
    pub answer: String,
    #[arg(long, conflicts_with = "incorrect", help = "Mark the answer correct yourself")]
    pub correct: bool,
    #[arg(long, help = "Mark the answer incorrect yourself")]
    pub incorrect: bool,
}

impl From<AnswerTaskArgs> for AnswerTask {
    fn from(val: AnswerTaskArgs) -> Self {
        let self_report = match (val.correct, val.incorrect) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        AnswerTask {
            task: val.task.into(),
            answer: val.answer,
            self_report,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Generate a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List all plans, newest first
    #[command(alias = "l")]
    List,
    /// Show a plan's roadmap
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// Permanently delete a plan
    Delete(PlanIdArgs),
    /// Export a plan as JSON
    Export(ExportPlanArgs),
    /// Import a plan from JSON
    Import(ImportPlanArgs),
}

#[derive(Subcommand)]
pub enum DayCommands {
    /// Show a day with its tasks
    #[command(alias = "s")]
    Show(DayArgs),
    /// Complete the current day and unlock the next
    #[command(alias = "c")]
    Complete(PlanIdArgs),
    /// Edit a day's notes, mood, topic or summary
    #[command(alias = "notes")]
    Update(UpdateDayArgs),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Mark a task done, or not done
    Toggle(TaskArgs),
    /// Answer a task's verification question
    Answer(AnswerTaskArgs),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show saved preferences
    Show,
    /// Set the language for generated content
    Language {
        #[arg(value_enum)]
        code: LanguageArg,
    },
    /// Set the color theme
    Theme {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
    /// Switch between the light and dark theme
    ToggleTheme,
}

/// Command-line representation of the content language
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    /// English
    En,
    /// Simplified Chinese
    Zh,
}

impl From<LanguageArg> for Language {
    fn from(val: LanguageArg) -> Self {
        match val {
            LanguageArg::En => Language::En,
            LanguageArg::Zh => Language::Zh,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(val: ThemeArg) -> Self {
        match val {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum MoodArg {
    Happy,
    Neutral,
    Tired,
    Confused,
}

impl std::fmt::Display for MoodArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoodArg::Happy => write!(f, "happy"),
            MoodArg::Neutral => write!(f, "neutral"),
            MoodArg::Tired => write!(f, "tired"),
            MoodArg::Confused => write!(f, "confused"),
        }
    }
}

// ============================================================================
// Command Handlers
// ============================================================================

/// Runs commands against a planner and renders their output.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
    timeout: Duration,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer, timeout: Duration) -> Self {
        Self {
            planner,
            renderer,
            timeout,
        }
    }

    /// Awaits a generator-backed operation, giving up after the timeout.
    async fn with_timeout<T>(&self, what: &str, fut: impl Future<Output = T>) -> Result<T> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| anyhow!("{what} timed out after {}s", self.timeout.as_secs()))
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                if !self.planner.has_generator() {
                    return Err(anyhow!(
                        "Plan generation needs an API key; set GEMINI_API_KEY and try again"
                    ));
                }
                let params = CreatePlan::from(args);
                info!("Generating plan for '{}'", params.topic);
                let plan = self
                    .with_timeout("Plan generation", self.planner.create_plan(&params))
                    .await?
                    .context("Failed to create plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => {
                let plan = self.planner.get_plan(&args.into()).await?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Delete(args) => {
                let params = PlanId::from(args);
                let status = match self.planner.delete_plan(&params).await? {
                    Some(entry) => DeleteResult::new(entry).to_string(),
                    None => OperationStatus::success(format!(
                        "No plan with ID {}; nothing deleted",
                        params.id
                    ))
                    .to_string(),
                };
                self.renderer.render(&status)
            }
            PlanCommands::Export(args) => {
                let json = self.planner.export_plan(&PlanId { id: args.id }).await?;
                match args.output {
                    Some(path) => {
                        std::fs::write(&path, format!("{json}\n"))
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        self.renderer.render(
                            &OperationStatus::success(format!("Exported to {}", path.display()))
                                .to_string(),
                        )
                    }
                    None => {
                        println!("{json}");
                        Ok(())
                    }
                }
            }
            PlanCommands::Import(args) => {
                let json = std::fs::read_to_string(&args.file)
                    .with_context(|| format!("Failed to read {}", args.file.display()))?;
                let plan = self.planner.import_plan(&json).await?;
                self.renderer.render(
                    &OperationStatus::success(format!("Imported plan with ID: {}", plan.id))
                        .to_string(),
                )?;
                self.renderer.render(&format!("\n{plan}"))
            }
        }
    }

    pub async fn handle_day_command(&self, command: DayCommands) -> Result<()> {
        match command {
            DayCommands::Show(args) => {
                let day = self.planner.show_day(&args.into()).await?;
                self.renderer.render(&day.to_string())
            }
            DayCommands::Complete(args) => {
                let (completion, recap) = self.planner.complete_day(&args.into()).await?;
                self.renderer.render(&completion.to_string())?;

                let recap = if recap.is_generated() {
                    match self.with_timeout("Recap", recap.wait()).await {
                        Ok(recap) => recap,
                        Err(e) => {
                            debug!("{e}");
                            Recap::fallback(self.planner.language().await.unwrap_or_default())
                        }
                    }
                } else {
                    recap.wait().await
                };
                self.renderer.render(&format!("\n{recap}"))
            }
            DayCommands::Update(args) => {
                let result = self.planner.update_day(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Toggle(args) => {
                let task = self.planner.toggle_task(&args.into()).await?;
                let state = if task.is_completed { "done" } else { "not done" };
                self.renderer.render(
                    &OperationStatus::success(format!("Task {} marked {state}", task.id))
                        .to_string(),
                )
            }
            TaskCommands::Answer(args) => {
                // The planner bounds the evaluator call itself
                let result = self.planner.answer_task(&AnswerTask::from(args)).await?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn handle_config_command(&self, command: ConfigCommands) -> Result<()> {
        let prefs = match command {
            ConfigCommands::Show => {
                let prefs = self.planner.preferences().await?;
                return self.renderer.render(&format!("# Preferences\n\n{prefs}"));
            }
            ConfigCommands::Language { code } => self.planner.set_language(code.into()).await?,
            ConfigCommands::Theme { theme } => self.planner.set_theme(theme.into()).await?,
            ConfigCommands::ToggleTheme => self.planner.toggle_theme().await?,
        };
        self.renderer.render(
            &OperationStatus::success(format!(
                "Preferences saved (language: {}, theme: {})",
                prefs.language, prefs.theme
            ))
            .to_string(),
        )
    }

    pub async fn dashboard(&self, params: &PlanId) -> Result<()> {
        let stats = self.planner.dashboard(params).await?;
        self.renderer.render(&stats.to_string())
    }

    pub async fn list_plans(&self) -> Result<()> {
        let plans = self.planner.list_plans().await?;
        self.renderer.render(&plans.to_string())
    }
}
