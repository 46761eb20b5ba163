//! Package inspection and installation through `<interpreter> -m pip`.

use crate::error::{NotebookError, NotebookResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::process::Output;
use tokio::process::Command as TokioCommand;

/// Captured result of an installer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallOutput {
    /// The command line that was executed, for display.
    pub command: String,
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl InstallOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// stdout followed by stderr, unmodified. A newline separates the two
    /// only when stdout does not already end with one.
    pub fn combined(&self) -> String {
        let mut combined = self.stdout.clone();
        if !combined.is_empty() && !combined.ends_with('\n') && !self.stderr.is_empty() {
            combined.push('\n');
        }
        combined.push_str(&self.stderr);
        combined
    }
}

#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Version string of the installed `package`.
    async fn installed_version(&self, package: &str) -> NotebookResult<String>;

    /// Force-installs exactly `package==version`.
    async fn install_exact(&self, package: &str, version: &str) -> NotebookResult<InstallOutput>;
}

/// `PackageManager` backed by pip running under a given Python interpreter.
#[derive(Debug, Clone)]
pub struct PipPackageManager {
    interpreter: String,
}

impl PipPackageManager {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self { interpreter: interpreter.into() }
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    async fn run_pip(&self, args: &[&str]) -> NotebookResult<Output> {
        tracing::debug!(interpreter = %self.interpreter, ?args, "running pip");
        TokioCommand::new(&self.interpreter)
            .arg("-m")
            .arg("pip")
            .args(args)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotebookError::Environment(format!("interpreter not found: {}", self.interpreter))
                } else {
                    NotebookError::Environment(format!("failed to run {} -m pip: {e}", self.interpreter))
                }
            })
    }
}

#[async_trait]
impl PackageManager for PipPackageManager {
    async fn installed_version(&self, package: &str) -> NotebookResult<String> {
        let output = self.run_pip(&["show", package]).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not found") {
                return Err(NotebookError::Environment(format!(
                    "package {package} is not installed for {}",
                    self.interpreter
                )));
            }
            return Err(NotebookError::Environment(format!(
                "pip show {package} failed: {}",
                stderr.trim()
            )));
        }

        parse_pip_show_version(&stdout).ok_or_else(|| {
            NotebookError::Environment(format!("pip show {package} reported no version"))
        })
    }

    async fn install_exact(&self, package: &str, version: &str) -> NotebookResult<InstallOutput> {
        let pinned = format!("{package}=={version}");
        let output = self.run_pip(&["install", "-U", pinned.as_str()]).await?;

        Ok(InstallOutput {
            command: format!("{} -m pip install -U {pinned}", self.interpreter),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Extracts the `Version:` field from `pip show` output.
pub fn parse_pip_show_version(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("Version:"))
        .map(|version| version.trim().to_string())
        .filter(|version| !version.is_empty())
}
