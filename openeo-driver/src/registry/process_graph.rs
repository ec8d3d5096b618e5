//! Process Graph Registry (GraphDB)
//!
//! Stored, named process graphs, independent of job execution. The graph
//! payload is opaque to the driver and passed through verbatim; structural
//! validation belongs to the process-chain compiler at execution time.

use sqlx::sqlite::SqlitePool;

/// Insert or silently replace a graph under `name`
pub async fn put(
    pool: &SqlitePool,
    name: &str,
    graph: &serde_json::Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO process_graphs (name, graph)
        VALUES ($1, $2)
        "#,
    )
    .bind(name)
    .bind(graph.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

/// Find a stored graph by name
pub async fn find_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<serde_json::Value>, sqlx::Error> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT graph FROM process_graphs WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?;

    row.map(|(graph,)| {
        serde_json::from_str(&graph).map_err(|err| sqlx::Error::Decode(Box::new(err)))
    })
    .transpose()
}

/// Delete a stored graph by name; reports whether a row existed
pub async fn delete(pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM process_graphs WHERE name = $1")
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
