//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// TaskAdvisor - turns a messy task list into a short action plan
#[derive(Parser)]
#[command(
    name = "ta",
    about = "Turns a messy task list into a short, time-boxed action plan",
    version,
    after_help = after_help()
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a plan for this session
    Plan {
        /// Read raw task text from a file
        #[arg(long, conflicts_with_all = ["text", "stdin"])]
        file: Option<PathBuf>,

        /// Raw task text given inline
        #[arg(long, conflicts_with = "stdin")]
        text: Option<String>,

        /// Read raw task text from standard input
        #[arg(long)]
        stdin: bool,

        /// Already-normalized tasks as a JSON array (skips normalization)
        #[arg(long, value_name = "PATH")]
        tasks_json: Option<PathBuf>,

        /// Minutes available for this session
        #[arg(short, long)]
        minutes: Option<u32>,

        /// Energy level (low, medium, high)
        #[arg(short, long)]
        energy: Option<String>,

        /// Use the deterministic shortlist as the final plan (no refiner call)
        #[arg(long)]
        deterministic: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Score tasks and show the deterministic shortlist (no LLM calls)
    Score {
        /// Already-normalized tasks as a JSON array (defaults to the sample set)
        #[arg(long, value_name = "PATH")]
        tasks_json: Option<PathBuf>,

        /// Minutes available for this session
        #[arg(short, long)]
        minutes: Option<u32>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the built-in sample tasks as JSON
    Sample,
}

/// Where log output goes
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskadvisor")
        .join("logs")
        .join("taskadvisor.log");
    debug!(?path, "get_log_path: returning path");
    path
}

fn after_help() -> String {
    format!("Logs are written to: {}", get_log_path().display())
}

/// Output format for plan/score commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use: text or json", s))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
