//! TaskAdvisor - time-boxed task planning
//!
//! CLI entry point.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use taskadvisor::advisor::{AdviceRequest, Advisor, PlanMode, TaskSource, prepare_plan, validate_tasks};
use taskadvisor::cli::{Cli, Command, OutputFormat, get_log_path};
use taskadvisor::config::Config;
use taskadvisor::domain::{Task, sample_tasks};
use taskadvisor::llm::create_client;
use taskadvisor::prompts::PromptLoader;
use taskadvisor::render::{render_plan, render_scores};

fn parse_level(s: &str) -> Option<tracing::Level> {
    match s.to_uppercase().as_str() {
        "TRACE" => Some(tracing::Level::TRACE),
        "DEBUG" => Some(tracing::Level::DEBUG),
        "INFO" => Some(tracing::Level::INFO),
        "WARN" | "WARNING" => Some(tracing::Level::WARN),
        "ERROR" => Some(tracing::Level::ERROR),
        _ => None,
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Logging isn't initialized yet, so nothing here can be traced
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => parse_level(s).unwrap_or_else(|| {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            tracing::Level::INFO
        }),
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log level comes from config before the full config load
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(provider = %config.llm.provider, model = %config.llm.model, "TaskAdvisor loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Plan {
            file,
            text,
            stdin,
            tasks_json,
            minutes,
            energy,
            deterministic,
            format,
        } => {
            debug!(?file, stdin, ?tasks_json, ?minutes, ?energy, deterministic, %format, "main: matched Plan command");
            let tasks = tasks_json.as_deref().map(read_tasks_json).transpose()?;
            let raw = read_raw_text(file.as_deref(), text, stdin)?;
            let mode = if deterministic {
                PlanMode::Deterministic
            } else {
                config.planner.mode
            };

            let request = AdviceRequest::new(TaskSource::from_options(tasks, raw))
                .with_minutes(minutes.unwrap_or(config.planner.available_minutes))
                .with_energy(energy.unwrap_or_else(|| config.planner.energy_level.clone()))
                .with_mode(mode);
            cmd_plan(&config, request, format).await
        }
        Command::Score {
            tasks_json,
            minutes,
            format,
        } => {
            debug!(?tasks_json, ?minutes, %format, "main: matched Score command");
            let tasks = match tasks_json.as_deref() {
                Some(path) => read_tasks_json(path)?,
                None => sample_tasks(),
            };
            cmd_score(&tasks, minutes.unwrap_or(config.planner.available_minutes), &config, format)
        }
        Command::Sample => {
            debug!("main: matched Sample command");
            println!("{}", serde_json::to_string_pretty(&sample_tasks())?);
            Ok(())
        }
    }
}

/// Load an already-normalized task list
fn read_tasks_json(path: &Path) -> Result<Vec<Task>> {
    debug!(?path, "read_tasks_json: called");
    let content = fs::read_to_string(path).context(format!("Failed to read tasks from {}", path.display()))?;
    let tasks: Vec<Task> =
        serde_json::from_str(&content).context(format!("Failed to parse tasks from {}", path.display()))?;
    Ok(tasks)
}

/// Collect raw task text from whichever source was given
fn read_raw_text(file: Option<&Path>, text: Option<String>, stdin: bool) -> Result<Option<String>> {
    debug!(?file, has_text = text.is_some(), stdin, "read_raw_text: called");
    if let Some(path) = file {
        let raw = fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
        return Ok(Some(raw));
    }
    if text.is_some() {
        return Ok(text);
    }
    if stdin {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read task text from stdin")?;
        return Ok(Some(raw));
    }
    Ok(None)
}

/// Build an advisor, creating an LLM client only when the run needs one
fn build_advisor(config: &Config, request: &AdviceRequest) -> Result<Advisor> {
    let needs_llm = request.mode == PlanMode::Refine || matches!(request.source, TaskSource::Raw(_));
    debug!(needs_llm, mode = %request.mode, "build_advisor: called");
    if !needs_llm {
        return Ok(Advisor::offline());
    }

    config.validate().context("LLM configuration is incomplete")?;
    let llm = create_client(&config.llm).context("Failed to create LLM client")?;

    let prompts_root = match &config.planner.prompts_root {
        Some(root) => root.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    Ok(Advisor::from_llm(llm, Arc::new(PromptLoader::new(prompts_root))))
}

/// Run the advisor and print the plan
async fn cmd_plan(config: &Config, request: AdviceRequest, format: OutputFormat) -> Result<()> {
    debug!(%format, "cmd_plan: called");
    let advisor = build_advisor(config, &request)?;

    let plan = match advisor.run(request).await {
        Ok(plan) => plan,
        Err(e) => {
            if let Some(raw) = e.raw_response() {
                warn!(%raw, "cmd_plan: collaborator reply could not be parsed");
                eprintln!("{} {}\n{}", "✗".red(), "Unparseable reply:".bold(), raw.dimmed());
            }
            return Err(e).context("Planning failed");
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => print!("{}", render_plan(&plan)?),
    }
    Ok(())
}

/// Score tasks and show the deterministic shortlist
fn cmd_score(tasks: &[Task], available_minutes: u32, config: &Config, format: OutputFormat) -> Result<()> {
    debug!(count = tasks.len(), available_minutes, %format, "cmd_score: called");
    validate_tasks(tasks)?;
    let payload = prepare_plan(tasks, available_minutes, &config.planner.energy_level);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&payload)?),
        OutputFormat::Text => print!("{}", render_scores(&payload)?),
    }
    Ok(())
}
