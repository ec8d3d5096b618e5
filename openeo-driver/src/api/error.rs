//! API Error Handling
//!
//! Unified error types and conversion for API responses. Every failure is
//! answered with a structured `{id, message}` payload so clients always get
//! a machine-distinguishable outcome and a human-readable message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::gateway::GatewayError;
use crate::service::{collection, job, process_graph};

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    DatabaseError(sqlx::Error),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::DatabaseError(err) => {
                tracing::error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (
            status,
            Json(serde_json::json!({ "id": Uuid::new_v4(), "message": message })),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}

impl From<job::JobError> for ApiError {
    fn from(err: job::JobError) -> Self {
        match err {
            job::JobError::NotFound(id) => ApiError::NotFound(format!("Job {} not found", id)),
            job::JobError::Validation(msg) => ApiError::BadRequest(msg),
            job::JobError::InvalidTransition { job_id, from, to } => ApiError::Conflict(format!(
                "Job {} cannot transition from {} to {}",
                job_id, from, to
            )),
            job::JobError::Database(err) => ApiError::DatabaseError(err),
        }
    }
}

impl From<process_graph::GraphError> for ApiError {
    fn from(err: process_graph::GraphError) -> Self {
        match err {
            process_graph::GraphError::NotFound(name) => {
                ApiError::NotFound(format!("Process graph {} not found", name))
            }
            process_graph::GraphError::Database(err) => ApiError::DatabaseError(err),
        }
    }
}

impl From<collection::CollectionError> for ApiError {
    fn from(err: collection::CollectionError) -> Self {
        match err {
            collection::CollectionError::Gateway(GatewayError::Resolution(name)) => {
                ApiError::BadRequest(format!(
                    "Unable to resolve dataset name <{}> into backend addressing components",
                    name
                ))
            }
            collection::CollectionError::Gateway(GatewayError::Backend { status, message }) => {
                ApiError::BadRequest(format!(
                    "Backend reported status {} while fetching metadata: {}",
                    status, message
                ))
            }
            collection::CollectionError::Gateway(GatewayError::Transport(err)) => {
                ApiError::InternalError(format!("Backend unreachable: {}", err))
            }
            collection::CollectionError::Gateway(GatewayError::Decode(err)) => {
                ApiError::BadRequest(format!("Malformed backend metadata: {}", err))
            }
            collection::CollectionError::MalformedMetadata(msg) => {
                ApiError::BadRequest(format!("Malformed backend metadata: {}", msg))
            }
            collection::CollectionError::Projection(err) => {
                ApiError::InternalError(format!("Extent reprojection failed: {}", err))
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
