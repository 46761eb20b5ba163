use crate::error::NotebookResult;
use crate::job::{ListTrainingJobsRequest, TrainingJobDescription, TrainingJobSummary};
use async_trait::async_trait;

/// Read-only access to the managed training service.
///
/// Callers construct a client with its region and credentials already decided
/// and pass it into each helper.
#[async_trait]
pub trait TrainingJobApi: Send + Sync {
    fn id(&self) -> &'static str;

    /// Returns the matching summaries in the order the service produced them.
    async fn list_training_jobs(
        &self,
        request: &ListTrainingJobsRequest,
    ) -> NotebookResult<Vec<TrainingJobSummary>>;

    async fn describe_training_job(&self, job_name: &str) -> NotebookResult<TrainingJobDescription>;
}
