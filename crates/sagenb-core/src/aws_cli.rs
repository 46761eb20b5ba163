//! `TrainingJobApi` backed by the AWS CLI.
//!
//! Region, profile and credentials resolve the way the AWS CLI resolves them;
//! `with_region`/`with_profile` pin them explicitly.

use crate::api::TrainingJobApi;
use crate::error::{NotebookError, NotebookResult};
use crate::job::{ListTrainingJobsRequest, ListTrainingJobsResponse, TrainingJobDescription, TrainingJobSummary};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use tokio::process::Command as TokioCommand;
use tokio::time::{Duration, timeout};

static AWS_ERROR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"An error occurred \(([^)]+)\) when calling the (\w+) operation(?: \([^)]*\))?: (.*)")
        .expect("valid AWS error regex")
});

#[derive(Debug, Clone)]
pub struct AwsCliClient {
    cli_path: String,
    region: Option<String>,
    profile: Option<String>,
    /// Command timeout duration (default: 60 seconds)
    command_timeout: Duration,
}

impl Default for AwsCliClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AwsCliClient {
    pub fn new() -> Self {
        Self {
            cli_path: "aws".to_string(),
            region: None,
            profile: None,
            command_timeout: Duration::from_secs(60),
        }
    }

    #[must_use]
    pub fn with_cli_path(mut self, cli_path: impl Into<String>) -> Self {
        self.cli_path = cli_path.into();
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    #[must_use]
    pub fn with_command_timeout(mut self, timeout_seconds: u64) -> Self {
        self.command_timeout = Duration::from_secs(timeout_seconds);
        self
    }

    pub fn cli_path(&self) -> &str {
        &self.cli_path
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn command_timeout(&self) -> Duration {
        self.command_timeout
    }

    /// Full argument list for `aws sagemaker <operation> ...`.
    pub fn sagemaker_args(&self, operation: &str, operation_args: Vec<String>) -> Vec<String> {
        let mut args = vec!["sagemaker".to_string(), operation.to_string()];
        args.extend(operation_args);
        args.extend(["--output".to_string(), "json".to_string()]);
        if let Some(region) = &self.region {
            args.extend(["--region".to_string(), region.clone()]);
        }
        if let Some(profile) = &self.profile {
            args.extend(["--profile".to_string(), profile.clone()]);
        }
        args
    }

    async fn execute(&self, args: &[String]) -> NotebookResult<String> {
        tracing::debug!(cli = %self.cli_path, ?args, "running aws cli");
        let mut cmd = TokioCommand::new(&self.cli_path);
        cmd.args(args).kill_on_drop(true);

        let output = timeout(self.command_timeout, cmd.output())
            .await
            .map_err(|_| NotebookError::Timeout(self.command_timeout))?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotebookError::CliNotFound(self.cli_path.clone())
                } else {
                    NotebookError::Io(e)
                }
            })?;

        if !output.status.success() {
            let operation = args.get(1).map_or("unknown", String::as_str);
            return Err(classify_failure(operation, &String::from_utf8_lossy(&output.stderr)));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| NotebookError::Parse(format!("aws cli output is not UTF-8: {e}")))
    }
}

/// Builds the arguments of `list-training-jobs` for `request`.
///
/// The name filter is attached with `=` so a value starting with `-` is not
/// read as an option by the CLI's argument parser.
pub fn list_training_jobs_args(request: &ListTrainingJobsRequest) -> Vec<String> {
    let mut args = vec![
        format!("--name-contains={}", request.name_contains),
        "--sort-by".to_string(),
        request.sort_by.as_str().to_string(),
        "--sort-order".to_string(),
        request.sort_order.as_str().to_string(),
    ];
    if let Some(status) = &request.status_equals {
        args.extend(["--status-equals".to_string(), status.as_str().to_string()]);
    }
    if let Some(max) = request.max_results {
        args.extend(["--max-items".to_string(), max.to_string()]);
    }
    args
}

/// Maps AWS CLI stderr to an error, keeping the service's code and message.
pub fn classify_failure(operation: &str, stderr: &str) -> NotebookError {
    if let Some(caps) = AWS_ERROR.captures(stderr) {
        return NotebookError::RemoteService {
            code: caps[1].to_string(),
            operation: caps[2].to_string(),
            message: caps[3].trim().to_string(),
        };
    }
    NotebookError::RemoteService {
        code: "Unknown".to_string(),
        operation: operation.to_string(),
        message: stderr.trim().to_string(),
    }
}

#[async_trait]
impl TrainingJobApi for AwsCliClient {
    fn id(&self) -> &'static str {
        "aws-cli"
    }

    async fn list_training_jobs(
        &self,
        request: &ListTrainingJobsRequest,
    ) -> NotebookResult<Vec<TrainingJobSummary>> {
        let args = self.sagemaker_args("list-training-jobs", list_training_jobs_args(request));
        let stdout = self.execute(&args).await?;
        let response: ListTrainingJobsResponse = serde_json::from_str(&stdout)
            .map_err(|e| NotebookError::Parse(format!("list-training-jobs: {e}")))?;
        Ok(response.training_job_summaries)
    }

    async fn describe_training_job(&self, job_name: &str) -> NotebookResult<TrainingJobDescription> {
        let args = self.sagemaker_args(
            "describe-training-job",
            vec![format!("--training-job-name={job_name}")],
        );
        let stdout = self.execute(&args).await?;
        serde_json::from_str(&stdout).map_err(|e| NotebookError::Parse(format!("describe-training-job: {e}")))
    }
}
