//! Process Graph API Handlers
//!
//! HTTP endpoints for stored, named process graphs.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::process_graph_service;

/// PUT /process_graphs/{name}
/// Store a graph under a name, replacing any previous graph silently
pub async fn put_graph(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(graph): Json<serde_json::Value>,
) -> ApiResult<StatusCode> {
    process_graph_service::store_graph(&state.pool, &name, graph).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /process_graphs/{name}
/// Get a stored graph by name
pub async fn get_graph(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    tracing::debug!("Getting process graph: {}", name);

    let graph = process_graph_service::get_graph(&state.pool, &name).await?;

    Ok(Json(graph))
}

/// DELETE /process_graphs/{name}
/// Delete a stored graph by name
pub async fn delete_graph(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    process_graph_service::delete_graph(&state.pool, &name).await?;

    Ok(StatusCode::NO_CONTENT)
}
