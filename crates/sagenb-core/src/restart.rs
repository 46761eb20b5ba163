//! Kernel restart capability.
//!
//! The dependency checker only asks for a restart; what that means depends on
//! where the code is embedded.

use crate::error::{NotebookError, NotebookResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

#[async_trait]
pub trait RestartSignal: Send + Sync {
    fn id(&self) -> &'static str;

    /// True when `request_restart` does not return to the caller.
    fn terminates_process(&self) -> bool {
        false
    }

    async fn request_restart(&self) -> NotebookResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartMode {
    /// Record the request and carry on.
    #[default]
    None,
    /// Terminate the current process.
    Exit,
    /// Ask the hosting Jupyter server to restart the kernel.
    Jupyter,
}

impl FromStr for RestartMode {
    type Err = NotebookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "exit" => Ok(Self::Exit),
            "jupyter" => Ok(Self::Jupyter),
            other => Err(NotebookError::InvalidInput(format!(
                "unknown restart mode '{other}' (expected none, exit or jupyter)"
            ))),
        }
    }
}

/// For non-interactive embeddings: logs the request and does nothing else.
#[derive(Debug, Default)]
pub struct NoRestart;

#[async_trait]
impl RestartSignal for NoRestart {
    fn id(&self) -> &'static str {
        "none"
    }

    async fn request_restart(&self) -> NotebookResult<()> {
        tracing::info!("kernel restart requested; no interactive kernel attached, continuing");
        Ok(())
    }
}

/// Exits the process so a supervising kernel manager brings it back.
#[derive(Debug, Clone, Copy)]
pub struct ExitProcess {
    code: i32,
}

impl ExitProcess {
    pub fn new(code: i32) -> Self {
        Self { code }
    }
}

#[async_trait]
impl RestartSignal for ExitProcess {
    fn id(&self) -> &'static str {
        "exit"
    }

    fn terminates_process(&self) -> bool {
        true
    }

    async fn request_restart(&self) -> NotebookResult<()> {
        tracing::info!(code = self.code, "exiting process to restart kernel");
        std::process::exit(self.code)
    }
}

/// Restarts a kernel through the Jupyter server REST API
/// (`POST /api/kernels/<id>/restart`).
#[derive(Debug, Clone)]
pub struct JupyterKernelRestart {
    server_url: String,
    kernel_id: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl JupyterKernelRestart {
    pub fn new(server_url: impl Into<String>, kernel_id: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into().trim_end_matches('/').to_string(),
            kernel_id: kernel_id.into(),
            token: None,
            client: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn kernel_id(&self) -> &str {
        &self.kernel_id
    }

    pub fn restart_url(&self) -> String {
        format!("{}/api/kernels/{}/restart", self.server_url, self.kernel_id)
    }
}

#[async_trait]
impl RestartSignal for JupyterKernelRestart {
    fn id(&self) -> &'static str {
        "jupyter"
    }

    async fn request_restart(&self) -> NotebookResult<()> {
        let url = self.restart_url();
        tracing::info!(%url, "requesting kernel restart from Jupyter server");

        let mut request = self.client.post(&url);
        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await.map_err(|e| {
            NotebookError::Environment(format!("no Jupyter server reachable at {}: {e}", self.server_url))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotebookError::Environment(format!(
                "Jupyter server refused to restart kernel {} ({status}): {}",
                self.kernel_id,
                body.trim()
            )));
        }
        Ok(())
    }
}

/// Kernel id from a connection file name such as
/// `/run/user/1000/jupyter/kernel-4f1c2b1e-….json`.
pub fn kernel_id_from_connection_file(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.strip_prefix("kernel-"))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
