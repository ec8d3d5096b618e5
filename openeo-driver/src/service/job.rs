//! Job Service
//!
//! Business logic for job submission and lifecycle. This is the only
//! component that mutates the job registry in response to client intent or
//! execution-engine reports.

use openeo_core::domain::job::{self, Job, JobStatus};
use openeo_core::dto::job::{StatusUpdate, SubmitJob};
use sqlx::sqlite::SqlitePool;

use crate::registry::job_registry;

/// Service error type
#[derive(Debug)]
pub enum JobError {
    NotFound(String),
    Validation(String),
    InvalidTransition {
        job_id: String,
        from: JobStatus,
        to: JobStatus,
    },
    Database(sqlx::Error),
}

impl From<sqlx::Error> for JobError {
    fn from(err: sqlx::Error) -> Self {
        JobError::Database(err)
    }
}

/// Submit a new job; returns the generated job id
pub async fn submit(pool: &SqlitePool, req: SubmitJob) -> Result<String, JobError> {
    let Some(process_graph) = req.process_graph else {
        return Err(JobError::Validation(
            "A process graph is required in the request".to_string(),
        ));
    };

    let job = Job {
        job_id: job::new_job_id(),
        title: req.title,
        description: req.description,
        process_graph: Some(process_graph),
        output: None,
        status: JobStatus::Submitted,
        submitted: chrono::Utc::now(),
        updated: None,
    };

    job_registry::put(pool, &job).await?;

    tracing::info!("Job submitted: {}", job.job_id);

    Ok(job.job_id)
}

/// Get a job by ID (full record, including the process graph snapshot)
pub async fn get_job(pool: &SqlitePool, job_id: &str) -> Result<Job, JobError> {
    let job = job_registry::find_by_id(pool, job_id)
        .await?
        .ok_or_else(|| JobError::NotFound(job_id.to_string()))?;

    Ok(job)
}

/// List all jobs in summary form
///
/// The `process_graph` field is cleared on every returned entry; listings
/// never carry graph payloads.
pub async fn list_jobs(pool: &SqlitePool) -> Result<Vec<Job>, JobError> {
    let mut jobs = job_registry::list_all(pool).await?;
    for job in &mut jobs {
        job.process_graph = None;
    }
    Ok(jobs)
}

/// Apply one state transition reported by the execution engine
///
/// The read-modify-write runs inside a transaction so transitions on the
/// same record never interleave. Invalid transitions (any move out of a
/// terminal state, or a skip the machine does not permit) fail and leave
/// the record unchanged.
pub async fn update_status(
    pool: &SqlitePool,
    job_id: &str,
    update: StatusUpdate,
) -> Result<Job, JobError> {
    let mut tx = pool.begin().await?;

    let mut job = job_registry::find_by_id_for_update(&mut tx, job_id)
        .await?
        .ok_or_else(|| JobError::NotFound(job_id.to_string()))?;

    if !job.status.can_transition_to(update.status) {
        return Err(JobError::InvalidTransition {
            job_id: job_id.to_string(),
            from: job.status,
            to: update.status,
        });
    }

    let now = chrono::Utc::now();
    // A result descriptor is only meaningful on successful completion.
    let output = if update.status == JobStatus::Finished {
        update.output
    } else {
        None
    };

    job_registry::apply_status(&mut tx, job_id, update.status, now, output.as_ref()).await?;
    tx.commit().await?;

    tracing::info!("Job {} transitioned {} -> {}", job_id, job.status, update.status);

    job.status = update.status;
    job.updated = Some(now);
    if output.is_some() {
        job.output = output;
    }

    Ok(job)
}

/// Clear the job database
pub async fn clear_jobs(pool: &SqlitePool) -> Result<(), JobError> {
    job_registry::delete_all(pool).await?;
    tracing::info!("All jobs deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use openeo_core::domain::job::JOB_ID_PREFIX;

    fn submit_request() -> SubmitJob {
        SubmitJob {
            process_graph: Some(serde_json::json!({
                "n1": {"process_id": "get_data", "args": {"data_id": "elevation"}}
            })),
            title: Some("t".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_submit_creates_submitted_job() {
        let pool = db::memory_pool().await;

        let job_id = submit(&pool, submit_request()).await.unwrap();
        assert!(job_id.starts_with(JOB_ID_PREFIX));

        let job = get_job(&pool, &job_id).await.unwrap();
        assert_eq!(job.status, JobStatus::Submitted);
        assert_eq!(job.title.as_deref(), Some("t"));
        assert!(job.description.is_none());
        assert!(job.output.is_none());
        assert!(job.updated.is_none());
        assert!(job.process_graph.is_some());
    }

    #[tokio::test]
    async fn test_submit_without_graph_is_rejected() {
        let pool = db::memory_pool().await;

        let req = SubmitJob {
            process_graph: None,
            title: Some("t".to_string()),
            description: None,
        };
        let err = submit(&pool, req).await.unwrap_err();
        assert!(matches!(err, JobError::Validation(_)));

        // The registry must not have been touched.
        assert!(list_jobs(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_clears_process_graph() {
        let pool = db::memory_pool().await;

        submit(&pool, submit_request()).await.unwrap();
        submit(&pool, submit_request()).await.unwrap();

        let jobs = list_jobs(&pool).await.unwrap();
        assert_eq!(jobs.len(), 2);
        for job in &jobs {
            assert!(job.process_graph.is_none());
            assert_eq!(job.status, JobStatus::Submitted);
        }
    }

    #[tokio::test]
    async fn test_clear_jobs_empties_registry() {
        let pool = db::memory_pool().await;

        submit(&pool, submit_request()).await.unwrap();
        clear_jobs(&pool).await.unwrap();

        assert!(list_jobs(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lifecycle_to_finished_stores_output() {
        let pool = db::memory_pool().await;
        let job_id = submit(&pool, submit_request()).await.unwrap();

        let job = update_status(
            &pool,
            &job_id,
            StatusUpdate {
                status: JobStatus::Running,
                output: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(job.status, JobStatus::Running);
        assert!(job.updated.is_some());

        let output = serde_json::json!({"format": "GTiff", "href": "/results/elevation.tif"});
        let job = update_status(
            &pool,
            &job_id,
            StatusUpdate {
                status: JobStatus::Finished,
                output: Some(output.clone()),
            },
        )
        .await
        .unwrap();
        assert_eq!(job.status, JobStatus::Finished);
        assert_eq!(job.output, Some(output.clone()));

        // Persisted record matches.
        let stored = get_job(&pool, &job_id).await.unwrap();
        assert_eq!(stored.status, JobStatus::Finished);
        assert_eq!(stored.output, Some(output));
    }

    #[tokio::test]
    async fn test_transition_out_of_terminal_state_is_rejected() {
        let pool = db::memory_pool().await;
        let job_id = submit(&pool, submit_request()).await.unwrap();

        update_status(
            &pool,
            &job_id,
            StatusUpdate {
                status: JobStatus::Canceled,
                output: None,
            },
        )
        .await
        .unwrap();

        let before = get_job(&pool, &job_id).await.unwrap();
        let err = update_status(
            &pool,
            &job_id,
            StatusUpdate {
                status: JobStatus::Running,
                output: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, JobError::InvalidTransition { .. }));

        // The record is unchanged after the rejected transition.
        let after = get_job(&pool, &job_id).await.unwrap();
        assert_eq!(after.status, before.status);
        assert_eq!(after.updated, before.updated);
    }

    #[tokio::test]
    async fn test_submitted_cannot_skip_to_finished() {
        let pool = db::memory_pool().await;
        let job_id = submit(&pool, submit_request()).await.unwrap();

        let err = update_status(
            &pool,
            &job_id,
            StatusUpdate {
                status: JobStatus::Finished,
                output: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, JobError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_update_status_unknown_job() {
        let pool = db::memory_pool().await;
        let err = update_status(
            &pool,
            "user-job::00000000-0000-0000-0000-000000000000",
            StatusUpdate {
                status: JobStatus::Running,
                output: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, JobError::NotFound(_)));
    }
}
