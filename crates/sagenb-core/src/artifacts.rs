use crate::api::TrainingJobApi;
use crate::error::{NotebookError, NotebookResult};
use crate::lookup::get_latest_training_job_name;
use serde::{Deserialize, Serialize};

/// A training job together with the location of its packaged model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModel {
    pub training_job_name: String,
    pub s3_model_artifacts: String,
}

/// Storage URI of the model artifact produced by `job_name`, exactly as the
/// service reports it.
pub async fn get_training_job_s3_model_artifacts(
    api: &dyn TrainingJobApi,
    job_name: &str,
) -> NotebookResult<String> {
    tracing::debug!(backend = api.id(), job_name, "describing training job");
    let description = api.describe_training_job(job_name).await?;

    description
        .model_artifacts
        .map(|artifacts| artifacts.s3_model_artifacts)
        .ok_or_else(|| NotebookError::MissingModelArtifacts(job_name.to_string()))
}

/// Latest completed job for `base_job_name` and its model artifact URI.
pub async fn latest_model_artifacts(
    api: &dyn TrainingJobApi,
    base_job_name: &str,
) -> NotebookResult<ResolvedModel> {
    let training_job_name = get_latest_training_job_name(api, base_job_name).await?;
    let s3_model_artifacts = get_training_job_s3_model_artifacts(api, &training_job_name).await?;
    Ok(ResolvedModel { training_job_name, s3_model_artifacts })
}
