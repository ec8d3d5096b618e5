//! Collection API Handlers
//!
//! HTTP endpoint for normalized catalog metadata.

use axum::{
    Json,
    extract::{Path, State},
};
use openeo_core::domain::collection::CollectionInformation;

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::collection_service;

/// GET /collections/{name}
/// Describe a backend dataset as a canonical collection record
pub async fn describe_collection(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<CollectionInformation>> {
    tracing::debug!("Describing collection: {}", name);

    let info = collection_service::describe(state.gateway.as_ref(), &name).await?;

    Ok(Json(info))
}
