//! Process Graph Service
//!
//! Management of stored, named process graphs. Graph names are a namespace
//! of their own, distinct from job ids.

use sqlx::sqlite::SqlitePool;

use crate::registry::process_graph_registry;

/// Service error type
#[derive(Debug)]
pub enum GraphError {
    NotFound(String),
    Database(sqlx::Error),
}

impl From<sqlx::Error> for GraphError {
    fn from(err: sqlx::Error) -> Self {
        GraphError::Database(err)
    }
}

/// Store a graph under `name`, silently replacing any previous graph
pub async fn store_graph(
    pool: &SqlitePool,
    name: &str,
    graph: serde_json::Value,
) -> Result<(), GraphError> {
    process_graph_registry::put(pool, name, &graph).await?;
    tracing::info!("Process graph stored: {}", name);
    Ok(())
}

/// Get a stored graph by name
pub async fn get_graph(pool: &SqlitePool, name: &str) -> Result<serde_json::Value, GraphError> {
    let graph = process_graph_registry::find_by_name(pool, name)
        .await?
        .ok_or_else(|| GraphError::NotFound(name.to_string()))?;

    Ok(graph)
}

/// Delete a stored graph by name
pub async fn delete_graph(pool: &SqlitePool, name: &str) -> Result<(), GraphError> {
    let deleted = process_graph_registry::delete(pool, name).await?;
    if !deleted {
        return Err(GraphError::NotFound(name.to_string()));
    }
    tracing::info!("Process graph deleted: {}", name);
    Ok(())
}
