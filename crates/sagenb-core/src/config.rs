//! Configuration file support.
//!
//! Every field is optional so files can be layered: a later file only
//! overrides the fields it sets.

use crate::aws_cli::AwsCliClient;
use crate::dependencies::{DEFAULT_INTERPRETER, DEFAULT_PACKAGE, DEFAULT_REQUIRED_VERSION, DependencyRequirement};
use crate::error::{NotebookError, NotebookResult};
use crate::restart::{
    ExitProcess, JupyterKernelRestart, NoRestart, RestartMode, RestartSignal, kernel_id_from_connection_file,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookConfig {
    /// Log level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub dependency: DependencyConfig,

    #[serde(default)]
    pub restart: RestartConfig,
}

/// How to reach the training service. Credentials stay with the AWS CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_version: Option<String>,
    /// Python interpreter whose pip is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<RestartMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_id: Option<String>,
    /// Kernel connection file; the kernel id is taken from its name when
    /// `kernel_id` is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_file: Option<PathBuf>,
}

fn override_with<T: Clone>(target: &mut Option<T>, other: &Option<T>) {
    if let Some(value) = other {
        *target = Some(value.clone());
    }
}

impl AwsConfig {
    pub fn merge(&mut self, other: &Self) {
        override_with(&mut self.region, &other.region);
        override_with(&mut self.profile, &other.profile);
        override_with(&mut self.cli_path, &other.cli_path);
        override_with(&mut self.command_timeout_secs, &other.command_timeout_secs);
    }

    /// Client configured from this section.
    pub fn client(&self) -> AwsCliClient {
        let mut client = AwsCliClient::new();
        if let Some(cli_path) = &self.cli_path {
            client = client.with_cli_path(cli_path.clone());
        }
        if let Some(region) = &self.region {
            client = client.with_region(region.clone());
        }
        if let Some(profile) = &self.profile {
            client = client.with_profile(profile.clone());
        }
        if let Some(secs) = self.command_timeout_secs {
            client = client.with_command_timeout(secs);
        }
        client
    }
}

impl DependencyConfig {
    pub fn merge(&mut self, other: &Self) {
        override_with(&mut self.package, &other.package);
        override_with(&mut self.required_version, &other.required_version);
        override_with(&mut self.interpreter, &other.interpreter);
    }

    pub fn requirement(&self) -> DependencyRequirement {
        DependencyRequirement {
            package: self.package.clone().unwrap_or_else(|| DEFAULT_PACKAGE.to_string()),
            required_version: self
                .required_version
                .clone()
                .unwrap_or_else(|| DEFAULT_REQUIRED_VERSION.to_string()),
        }
    }

    pub fn interpreter(&self) -> &str {
        self.interpreter.as_deref().unwrap_or(DEFAULT_INTERPRETER)
    }
}

impl RestartConfig {
    pub fn merge(&mut self, other: &Self) {
        override_with(&mut self.mode, &other.mode);
        override_with(&mut self.exit_code, &other.exit_code);
        override_with(&mut self.server_url, &other.server_url);
        override_with(&mut self.token, &other.token);
        override_with(&mut self.kernel_id, &other.kernel_id);
        override_with(&mut self.connection_file, &other.connection_file);
    }

    /// Builds the restart capability selected by `mode`.
    pub fn build_signal(&self) -> NotebookResult<Box<dyn RestartSignal>> {
        match self.mode.unwrap_or_default() {
            RestartMode::None => Ok(Box::new(NoRestart)),
            RestartMode::Exit => Ok(Box::new(ExitProcess::new(self.exit_code.unwrap_or(0)))),
            RestartMode::Jupyter => {
                let server_url = self.server_url.clone().ok_or_else(|| {
                    NotebookError::Config("restart.server_url is required for jupyter restarts".to_string())
                })?;
                let kernel_id = self
                    .kernel_id
                    .clone()
                    .or_else(|| self.connection_file.as_deref().and_then(kernel_id_from_connection_file))
                    .ok_or_else(|| {
                        NotebookError::Config(
                            "restart.kernel_id or restart.connection_file is required for jupyter restarts"
                                .to_string(),
                        )
                    })?;

                let mut signal = JupyterKernelRestart::new(server_url, kernel_id);
                if let Some(token) = &self.token {
                    signal = signal.with_token(token.clone());
                }
                Ok(Box::new(signal))
            }
        }
    }
}

impl NotebookConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> NotebookResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NotebookError::Config(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| NotebookError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn to_toml(&self) -> NotebookResult<String> {
        toml::to_string_pretty(self).map_err(|e| NotebookError::Config(format!("failed to serialize: {e}")))
    }

    /// `~/.sagenb/config.toml`
    pub fn default_global_path() -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".sagenb").join("config.toml")
    }

    /// `./.sagenbrc`
    pub fn default_local_path() -> PathBuf {
        PathBuf::from(".sagenbrc")
    }

    /// Global config overridden by local config. Missing files are skipped.
    pub fn discover_and_load() -> NotebookResult<Self> {
        Self::load_layered(&[Self::default_global_path(), Self::default_local_path()])
    }

    /// Merges each existing file in order; later files win.
    pub fn load_layered(paths: &[PathBuf]) -> NotebookResult<Self> {
        let mut config = Self::default();
        for path in paths {
            if !path.exists() {
                continue;
            }
            tracing::debug!(path = %path.display(), "loading config");
            config.merge(&Self::load_from_file(path)?);
        }
        Ok(config)
    }

    /// Values from `other` override values in `self` if they are Some.
    pub fn merge(&mut self, other: &Self) {
        override_with(&mut self.log_level, &other.log_level);
        self.aws.merge(&other.aws);
        self.dependency.merge(&other.dependency);
        self.restart.merge(&other.restart);
    }
}
