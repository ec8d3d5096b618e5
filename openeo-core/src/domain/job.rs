//! Job domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix of every generated job identifier.
pub const JOB_ID_PREFIX: &str = "user-job::";

/// Batch job record
///
/// Structure shared between the job registry (persists) and the REST
/// boundary (reports). `process_graph` is a snapshot of the payload at
/// submission time; listing context clears it so summaries stay small.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_graph: Option<serde_json::Value>,
    pub output: Option<serde_json::Value>,
    pub status: JobStatus,
    pub submitted: chrono::DateTime<chrono::Utc>,
    pub updated: Option<chrono::DateTime<chrono::Utc>>,
}

/// Job lifecycle status
///
/// Wire form is lowercase (`"submitted"`, `"running"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Submitted,
    Running,
    Finished,
    Error,
    Canceled,
}

impl JobStatus {
    /// A terminal status accepts no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Error | Self::Canceled)
    }

    /// Whether the lifecycle state machine permits `self -> next`.
    ///
    /// Permitted: submitted -> running, submitted -> canceled,
    /// running -> finished | error | canceled. Everything else is rejected,
    /// including self-transitions and any move out of a terminal state.
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        match self {
            Self::Submitted => matches!(next, Self::Running | Self::Canceled),
            Self::Running => matches!(next, Self::Finished | Self::Error | Self::Canceled),
            Self::Finished | Self::Error | Self::Canceled => false,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Submitted => "submitted",
            Self::Running => "running",
            Self::Finished => "finished",
            Self::Error => "error",
            Self::Canceled => "canceled",
        };
        f.write_str(s)
    }
}

/// Generate a fresh job identifier of the form `user-job::<uuid>`.
///
/// Identifiers are never reused: a v4 UUID is drawn for every call, even
/// after the job database has been cleared.
pub fn new_job_id() -> String {
    format!("{}{}", JOB_ID_PREFIX, Uuid::new_v4())
}
