//! sagenb CLI - notebook helpers for managed model training
//!
//! Provides a `sagenb` command for finding the latest completed training job,
//! resolving its model artifact, and keeping the notebook SDK up to date.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use commands::{AwsArgs, CheckDepsArgs, ConfigCommand};
use sagenb_core::NotebookError;
use serde_json::json;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// sagenb - training job and dependency helpers for deployment notebooks
#[derive(Parser, Debug)]
#[command(
    name = "sagenb",
    author,
    version,
    about = "Training job lookup, model artifact resolution and SDK checks for deployment notebooks"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Additional configuration file, applied after ~/.sagenb/config.toml and ./.sagenbrc
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the most recent completed training job whose name contains PREFIX
    LatestJob {
        /// Job name prefix (substring filter)
        prefix: String,

        #[command(flatten)]
        aws: AwsArgs,

        /// Output the job summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the model artifact URI of a training job
    ModelArtifacts {
        /// Training job name
        job_name: String,

        #[command(flatten)]
        aws: AwsArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the latest completed job for PREFIX and print its model artifact URI
    ResolveModel {
        /// Job name prefix (substring filter)
        prefix: String,

        #[command(flatten)]
        aws: AwsArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the SDK package version and upgrade it (then restart the kernel) if too old
    CheckDeps(CheckDepsArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Command {
    /// Whether the command was asked for JSON output.
    fn json_output(&self) -> bool {
        match self {
            Self::LatestJob { json, .. } | Self::ModelArtifacts { json, .. } | Self::ResolveModel { json, .. } => {
                *json
            }
            Self::CheckDeps(check) => check.json,
            Self::Config(_) => false,
        }
    }
}

/// JSON body reported on stdout when a `--json` command fails.
fn error_json(err: &anyhow::Error) -> serde_json::Value {
    let code = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<NotebookError>())
        .map_or("ERROR", NotebookError::error_code);
    json!({ "error": code, "message": format!("{err:#}") })
}

fn log_level(name: &str) -> Level {
    match name {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let notebook_config = config::load_config(args.config.as_deref())?;

    // Initialize tracing; stdout is reserved for command output.
    let level = log_level(args.log_level.as_deref().or(notebook_config.log_level.as_deref()).unwrap_or("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let json_output = args.command.json_output();
    let result = match args.command {
        Command::LatestJob { prefix, aws, json } => {
            commands::jobs::latest_job(&notebook_config, &prefix, &aws, json).await
        }
        Command::ModelArtifacts { job_name, aws, json } => {
            commands::jobs::model_artifacts(&notebook_config, &job_name, &aws, json).await
        }
        Command::ResolveModel { prefix, aws, json } => {
            commands::jobs::resolve_model(&notebook_config, &prefix, &aws, json).await
        }
        Command::CheckDeps(check) => commands::deps::execute(&notebook_config, &check).await,
        Command::Config(command) => commands::config::execute(&notebook_config, &command),
    };

    if let Err(err) = &result
        && json_output
    {
        println!("{}", serde_json::to_string_pretty(&error_json(err))?);
    }
    result
}
