//! Job DTOs for the REST boundary

use serde::{Deserialize, Serialize};

use crate::domain::job::{Job, JobStatus};

/// Request to submit a new batch job
///
/// `process_graph` is optional at the parsing level so the service can
/// answer its absence with a descriptive validation error instead of a
/// bare deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJob {
    pub process_graph: Option<serde_json::Value>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Job status report from the execution engine to the driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: JobStatus,
    pub output: Option<serde_json::Value>,
}

/// Listing of all known jobs (summary view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobList {
    pub jobs: Vec<Job>,
}
