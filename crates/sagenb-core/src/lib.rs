//! sagenb core
//!
//! Helpers for model-deployment notebooks built around a managed training
//! service:
//! - Finding the latest completed training job by name (`get_latest_training_job_name`)
//! - Resolving a job's model artifact URI (`get_training_job_s3_model_artifacts`)
//! - Gating on a minimum SDK version and restarting the kernel after an
//!   upgrade (`DependencyChecker`)
//!
//! Every helper takes its collaborators as arguments: a `TrainingJobApi`
//! client, a `PackageManager`, an `EventSink` and a `RestartSignal`.

pub mod api;
pub mod artifacts;
pub mod aws_cli;
pub mod config;
pub mod dependencies;
pub mod error;
pub mod events;
pub mod job;
pub mod lookup;
pub mod pip;
pub mod restart;
pub mod version;

pub use api::TrainingJobApi;
pub use artifacts::{get_training_job_s3_model_artifacts, latest_model_artifacts, ResolvedModel};
pub use aws_cli::AwsCliClient;
pub use config::{AwsConfig, DependencyConfig, NotebookConfig, RestartConfig};
pub use dependencies::{check_dependencies, DependencyChecker, DependencyRequirement, DependencyStatus};
pub use error::{NotebookError, NotebookResult};
pub use events::{EventSink, NotebookEvent, StdoutEventSink, TracingEventSink};
pub use job::{
    ListTrainingJobsRequest, ModelArtifacts, SortBy, SortOrder, TrainingJobDescription, TrainingJobStatus,
    TrainingJobSummary,
};
pub use lookup::{get_latest_training_job_name, latest_training_job};
pub use pip::{InstallOutput, PackageManager, PipPackageManager};
pub use restart::{ExitProcess, JupyterKernelRestart, NoRestart, RestartMode, RestartSignal};
pub use version::VersionTuple;
