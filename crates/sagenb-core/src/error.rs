use std::time::Duration;
use thiserror::Error;

pub type NotebookResult<T> = std::result::Result<T, NotebookError>;

/// Errors surfaced by the notebook helpers.
///
/// Nothing is retried or recovered locally; every variant reaches the caller.
#[derive(Debug, Error)]
pub enum NotebookError {
    /// No completed training job matched the name filter.
    #[error("training job not found: {0}")]
    NotFound(String),

    /// The managed service rejected a request (unknown job, permissions, throttling).
    #[error("{operation} failed ({code}): {message}")]
    RemoteService { code: String, operation: String, message: String },

    /// The describe response carried no model artifact location.
    #[error("training job {0} has no model artifacts")]
    MissingModelArtifacts(String),

    /// A version string had a segment that is not an integer.
    #[error("malformed version string: {0:?}")]
    MalformedVersion(String),

    /// Interpreter, package or kernel is not available in this environment.
    #[error("environment error: {0}")]
    Environment(String),

    /// The package installer ran but exited unsuccessfully.
    #[error("package install failed with status {status:?}:\n{output}")]
    InstallFailed { status: Option<i32>, output: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("AWS CLI not found at '{0}'. Install the AWS CLI or point `aws.cli_path` at it.")]
    CliNotFound(String),

    #[error("command timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to parse service response: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl NotebookError {
    /// Stable code for the error kind, suitable for JSON output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::RemoteService { .. } => "REMOTE_SERVICE",
            Self::MissingModelArtifacts(_) => "MISSING_MODEL_ARTIFACTS",
            Self::MalformedVersion(_) => "MALFORMED_VERSION",
            Self::Environment(_) => "ENVIRONMENT",
            Self::InstallFailed { .. } => "INSTALL_FAILED",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::CliNotFound(_) => "CLI_NOT_FOUND",
            Self::Timeout(_) => "TIMEOUT",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }
}
