//! Job Registry (JobDB)
//!
//! Handles all database operations related to submitted jobs. Jobs are keyed
//! by their generated `job_id`; the registry never invents identifiers.

use openeo_core::domain::job::{Job, JobStatus};
use sqlx::sqlite::{SqliteConnection, SqlitePool};

/// Insert or replace a job keyed by `job_id`
pub async fn put(pool: &SqlitePool, job: &Job) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO jobs
            (job_id, title, description, process_graph, output, status, submitted, updated)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(&job.job_id)
    .bind(&job.title)
    .bind(&job.description)
    .bind(graph_to_string(job.process_graph.as_ref()))
    .bind(job.output.as_ref().map(|o| o.to_string()))
    .bind(status_to_string(job.status))
    .bind(job.submitted)
    .bind(job.updated)
    .execute(pool)
    .await?;

    Ok(())
}

/// Find a job by ID
pub async fn find_by_id(pool: &SqlitePool, job_id: &str) -> Result<Option<Job>, sqlx::Error> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT job_id, title, description, process_graph, output, status, submitted, updated
        FROM jobs
        WHERE job_id = $1
        "#,
    )
    .bind(job_id)
    .fetch_optional(pool)
    .await?;

    row.map(Job::try_from).transpose()
}

/// List all jobs
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Job>, sqlx::Error> {
    let rows = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT job_id, title, description, process_graph, output, status, submitted, updated
        FROM jobs
        ORDER BY submitted ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Job::try_from).collect()
}

/// Empty the registry; irreversible
pub async fn delete_all(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM jobs").execute(pool).await?;
    Ok(())
}

/// Read one job inside an open transaction, for a read-modify-write
///
/// A state transition must not interleave with another transition on the
/// same record; callers read through this, decide, then `apply_status`
/// before committing.
pub async fn find_by_id_for_update(
    conn: &mut SqliteConnection,
    job_id: &str,
) -> Result<Option<Job>, sqlx::Error> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT job_id, title, description, process_graph, output, status, submitted, updated
        FROM jobs
        WHERE job_id = $1
        "#,
    )
    .bind(job_id)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(Job::try_from).transpose()
}

/// Write the result of one state transition
pub async fn apply_status(
    conn: &mut SqliteConnection,
    job_id: &str,
    status: JobStatus,
    updated: chrono::DateTime<chrono::Utc>,
    output: Option<&serde_json::Value>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE jobs
        SET status = $1, updated = $2, output = COALESCE($3, output)
        WHERE job_id = $4
        "#,
    )
    .bind(status_to_string(status))
    .bind(updated)
    .bind(output.map(|o| o.to_string()))
    .bind(job_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

// =============================================================================
// Helper Functions
// =============================================================================

fn graph_to_string(graph: Option<&serde_json::Value>) -> String {
    graph.cloned().unwrap_or_default().to_string()
}

fn status_to_string(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Submitted => "submitted",
        JobStatus::Running => "running",
        JobStatus::Finished => "finished",
        JobStatus::Error => "error",
        JobStatus::Canceled => "canceled",
    }
}

fn string_to_status(s: &str) -> Result<JobStatus, sqlx::Error> {
    match s {
        "submitted" => Ok(JobStatus::Submitted),
        "running" => Ok(JobStatus::Running),
        "finished" => Ok(JobStatus::Finished),
        "error" => Ok(JobStatus::Error),
        "canceled" => Ok(JobStatus::Canceled),
        // Never default: a corrupted status must not let a terminal record
        // look transitionable again.
        other => Err(sqlx::Error::Decode(
            format!("unknown job status <{other}>").into(),
        )),
    }
}

fn decode_error(err: serde_json::Error) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct JobRow {
    job_id: String,
    title: Option<String>,
    description: Option<String>,
    process_graph: String,
    output: Option<String>,
    status: String,
    submitted: chrono::DateTime<chrono::Utc>,
    updated: Option<chrono::DateTime<chrono::Utc>>,
}

impl TryFrom<JobRow> for Job {
    type Error = sqlx::Error;

    fn try_from(row: JobRow) -> Result<Self, sqlx::Error> {
        let process_graph =
            match serde_json::from_str(&row.process_graph).map_err(decode_error)? {
                serde_json::Value::Null => None,
                value => Some(value),
            };
        let output = row
            .output
            .as_deref()
            .map(|o| serde_json::from_str(o).map_err(decode_error))
            .transpose()?;

        Ok(Job {
            job_id: row.job_id,
            title: row.title,
            description: row.description,
            process_graph,
            output,
            status: string_to_status(&row.status)?,
            submitted: row.submitted,
            updated: row.updated,
        })
    }
}
