//! Job API Handlers
//!
//! HTTP endpoints for job lifecycle management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use openeo_core::domain::job::Job;
use openeo_core::dto::job::{JobList, StatusUpdate, SubmitJob};

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::job_service;

/// POST /jobs
/// Submit a new job; answers 201 with the generated job id
pub async fn submit_job(
    State(state): State<AppState>,
    Json(req): Json<SubmitJob>,
) -> ApiResult<(StatusCode, String)> {
    let job_id = job_service::submit(&state.pool, req).await?;

    Ok((StatusCode::CREATED, job_id))
}

/// GET /jobs
/// List all jobs in summary form (no process graphs)
pub async fn list_jobs(State(state): State<AppState>) -> ApiResult<Json<JobList>> {
    tracing::debug!("Listing all jobs");

    let jobs = job_service::list_jobs(&state.pool).await?;

    Ok(Json(JobList { jobs }))
}

/// GET /jobs/{job_id}
/// Get the full job record, including the process graph snapshot
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<Job>> {
    tracing::debug!("Getting job: {}", job_id);

    let job = job_service::get_job(&state.pool, &job_id).await?;

    Ok(Json(job))
}

/// POST /jobs/{job_id}/status
/// Apply a state transition reported by the execution engine
pub async fn update_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> ApiResult<Json<Job>> {
    tracing::info!("Status report for job {}: {}", job_id, update.status);

    let mut job = job_service::update_status(&state.pool, &job_id, update).await?;
    job.process_graph = None;

    Ok(Json(job))
}

/// DELETE /jobs
/// Clear the job database
pub async fn clear_jobs(State(state): State<AppState>) -> ApiResult<StatusCode> {
    job_service::clear_jobs(&state.pool).await?;

    Ok(StatusCode::NO_CONTENT)
}
