use crate::api::TrainingJobApi;
use crate::error::{NotebookError, NotebookResult};
use crate::job::{ListTrainingJobsRequest, TrainingJobStatus, TrainingJobSummary};

/// Name of the most recently created completed training job whose name
/// contains `base_job_name`.
pub async fn get_latest_training_job_name(
    api: &dyn TrainingJobApi,
    base_job_name: &str,
) -> NotebookResult<String> {
    latest_training_job(api, base_job_name).await.map(|job| job.training_job_name)
}

/// Same as [`get_latest_training_job_name`] but returns the whole summary.
pub async fn latest_training_job(
    api: &dyn TrainingJobApi,
    base_job_name: &str,
) -> NotebookResult<TrainingJobSummary> {
    if base_job_name.trim().is_empty() {
        return Err(NotebookError::InvalidInput("base job name must not be empty".to_string()));
    }

    let request = ListTrainingJobsRequest::completed_newest_first(base_job_name);
    tracing::debug!(backend = api.id(), name_contains = base_job_name, "listing completed training jobs");
    let jobs = api.list_training_jobs(&request).await?;

    newest_completed(jobs).ok_or_else(|| NotebookError::NotFound(base_job_name.to_string()))
}

/// Picks the completed job with the latest creation time.
///
/// Ties keep the service's order: the first job listed wins.
pub(crate) fn newest_completed(jobs: Vec<TrainingJobSummary>) -> Option<TrainingJobSummary> {
    let mut newest: Option<TrainingJobSummary> = None;
    for job in jobs {
        if job.training_job_status != TrainingJobStatus::Completed {
            continue;
        }
        let is_newer = newest.as_ref().is_none_or(|current| job.creation_time > current.creation_time);
        if is_newer {
            newest = Some(job);
        }
    }
    newest
}
