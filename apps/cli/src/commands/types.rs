//! Command type definitions shared between main.rs and the command modules.

use clap::{Args, Subcommand};
use sagenb_core::{AwsConfig, DependencyConfig, RestartConfig, RestartMode};
use std::path::PathBuf;

/// Overrides for how the training service is reached.
#[derive(Args, Debug, Clone, Default)]
pub struct AwsArgs {
    /// AWS region (defaults to the AWS CLI's own resolution)
    #[arg(long)]
    pub region: Option<String>,

    /// AWS CLI named profile
    #[arg(long)]
    pub profile: Option<String>,

    /// Path to the `aws` executable
    #[arg(long = "aws-cli")]
    pub aws_cli: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl AwsArgs {
    pub fn as_config(&self) -> AwsConfig {
        AwsConfig {
            region: self.region.clone(),
            profile: self.profile.clone(),
            cli_path: self.aws_cli.clone(),
            command_timeout_secs: self.timeout,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckDepsArgs {
    /// Package to check (default: sagemaker)
    #[arg(long)]
    pub package: Option<String>,

    /// Minimum required version; upgrades pin exactly this version
    #[arg(long)]
    pub required_version: Option<String>,

    /// Python interpreter whose pip is used (default: python3)
    #[arg(long)]
    pub interpreter: Option<String>,

    /// What to do after an upgrade (none, exit, jupyter)
    #[arg(long)]
    pub restart: Option<RestartMode>,

    /// Process exit code for `--restart exit`
    #[arg(long)]
    pub exit_code: Option<i32>,

    /// Jupyter server URL for `--restart jupyter`
    #[arg(long)]
    pub server_url: Option<String>,

    /// Jupyter server token
    #[arg(long)]
    pub token: Option<String>,

    /// Kernel to restart
    #[arg(long)]
    pub kernel_id: Option<String>,

    /// Kernel connection file (kernel id is read from its name)
    #[arg(long)]
    pub connection_file: Option<PathBuf>,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckDepsArgs {
    pub fn dependency_config(&self) -> DependencyConfig {
        DependencyConfig {
            package: self.package.clone(),
            required_version: self.required_version.clone(),
            interpreter: self.interpreter.clone(),
        }
    }

    pub fn restart_config(&self) -> RestartConfig {
        RestartConfig {
            mode: self.restart,
            exit_code: self.exit_code,
            server_url: self.server_url.clone(),
            token: self.token.clone(),
            kernel_id: self.kernel_id.clone(),
            connection_file: self.connection_file.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Print the merged configuration as TOML
    Show,

    /// Print the configuration file locations that are searched
    Paths,
}
