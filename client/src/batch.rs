use camunda_base::error::{CamundaError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

/// Engine-tracked long-running job, returned by asynchronous operations.
///
/// See: <https://docs.camunda.org/manual/latest/reference/rest/batch/get/>
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: String,
    #[serde(rename = "type")]
    pub batch_type: Option<String>,
    pub total_jobs: i64,
    pub jobs_created: i64,
    pub batch_jobs_per_seed: Option<i64>,
    pub invocations_per_batch_job: Option<i64>,
    pub seed_job_definition_id: Option<String>,
    pub monitor_job_definition_id: Option<String>,
    pub batch_job_definition_id: Option<String>,
    pub tenant_id: Option<String>,
    pub suspended: Option<bool>,
    pub create_user_id: Option<String>,
}

impl Batch {
    /// `id`, `totalJobs` and `jobsCreated` are required; the remaining keys
    /// differ between engine versions and may be absent.
    pub fn load(data: &Value) -> Result<Self> {
        Self::deserialize(data).map_err(CamundaError::from_decode)
    }
}
