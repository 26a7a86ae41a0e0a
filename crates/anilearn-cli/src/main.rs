//! AniLearn CLI Application
//!
//! Command-line interface for the AniLearn learning planner.

mod args;
mod cli;
mod renderer;

use std::time::Duration;

use anilearn_core::{GeminiConfig, GeminiGenerator, PlanId, PlannerBuilder};
use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::{debug, info};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        language,
        model,
        timeout_secs,
        command,
    } = Args::parse();
    let timeout = Duration::from_secs(timeout_secs);

    let mut builder = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_language(language.map(Into::into))
        .with_timeout(Some(timeout));

    match GeminiConfig::from_env() {
        Ok(config) => {
            let config = match model {
                Some(model) => config.with_model(model),
                None => config,
            }
            .with_timeout(Some(timeout));
            debug!("Using generator {config:?}");
            let generator =
                GeminiGenerator::new(config).context("Failed to initialize plan generator")?;
            builder = builder.with_generator(generator);
        }
        Err(e) => debug!("Plan generator disabled: {e}"),
    }

    let planner = builder.build().await.context("Failed to initialize planner")?;

    let theme = planner.preferences().await?.theme;
    let renderer = TerminalRenderer::new(!no_color, theme);

    info!("AniLearn started");

    let cli = Cli::new(planner, renderer, timeout);
    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Day { command }) => cli.handle_day_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Dashboard(args)) => cli.dashboard(&PlanId::from(args)).await,
        Some(Config { command }) => cli.handle_config_command(command).await,
        None => cli.list_plans().await,
    }
}
