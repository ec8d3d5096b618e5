//! API Module
//!
//! HTTP API layer for the driver.
//! Each submodule handles endpoints for a specific domain.

pub mod capabilities;
pub mod collection;
pub mod error;
pub mod health;
pub mod job;
pub mod process_graph;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use sqlx::sqlite::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::gateway::BackendGateway;

/// Shared application state: the registry pool and the backend gateway
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub gateway: Arc<dyn BackendGateway>,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Discovery documents
        .route("/capabilities", get(capabilities::capabilities))
        .route("/service_types", get(capabilities::service_types))
        .route("/output_formats", get(capabilities::output_formats))
        // Collection metadata
        .route("/collections/{name}", get(collection::describe_collection))
        // Job endpoints
        .route("/jobs", post(job::submit_job))
        .route("/jobs", get(job::list_jobs))
        .route("/jobs", delete(job::clear_jobs))
        .route("/jobs/{job_id}", get(job::get_job))
        .route("/jobs/{job_id}/status", post(job::update_job_status))
        // Stored process graphs
        .route("/process_graphs/{name}", put(process_graph::put_graph))
        .route("/process_graphs/{name}", get(process_graph::get_graph))
        .route("/process_graphs/{name}", delete(process_graph::delete_graph))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
