//! Registry Module
//!
//! Persistence layer for the driver. Each registry handles the keyed store
//! operations for one entity: submitted jobs and named process graphs.

pub mod job;
pub mod process_graph;

// Re-export for convenience
pub use job as job_registry;
pub use process_graph as process_graph_registry;
