use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a remote training job as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrainingJobStatus {
    InProgress,
    Completed,
    Failed,
    Stopping,
    Stopped,
    /// A status this crate does not know about yet.
    Unknown(String),
}

impl TrainingJobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Stopping => "Stopping",
            Self::Stopped => "Stopped",
            Self::Unknown(other) => other,
        }
    }
}

impl From<String> for TrainingJobStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "InProgress" => Self::InProgress,
            "Completed" => Self::Completed,
            "Failed" => Self::Failed,
            "Stopping" => Self::Stopping,
            "Stopped" => Self::Stopped,
            _ => Self::Unknown(value),
        }
    }
}

impl From<TrainingJobStatus> for String {
    fn from(value: TrainingJobStatus) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for TrainingJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a training job listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainingJobSummary {
    pub training_job_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_job_arn: Option<String>,
    pub creation_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
    pub training_job_status: TrainingJobStatus,
}

/// Listing response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTrainingJobsResponse {
    #[serde(default)]
    pub training_job_summaries: Vec<TrainingJobSummary>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelArtifacts {
    pub s3_model_artifacts: String,
}

/// Subset of a describe response that the helpers read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainingJobDescription {
    pub training_job_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_job_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_job_status: Option<TrainingJobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_artifacts: Option<ModelArtifacts>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Name,
    CreationTime,
    Status,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::CreationTime => "CreationTime",
            Self::Status => "Status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }
}

/// Filter and ordering for a training job listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTrainingJobsRequest {
    pub name_contains: String,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub status_equals: Option<TrainingJobStatus>,
    pub max_results: Option<u32>,
}

impl ListTrainingJobsRequest {
    /// Completed jobs whose name contains `name_contains`, newest first.
    #[must_use]
    pub fn completed_newest_first(name_contains: impl Into<String>) -> Self {
        Self {
            name_contains: name_contains.into(),
            sort_by: SortBy::CreationTime,
            sort_order: SortOrder::Descending,
            status_equals: Some(TrainingJobStatus::Completed),
            max_results: None,
        }
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}
