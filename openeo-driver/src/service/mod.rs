//! Service Module
//!
//! Business logic layer for the driver. Services orchestrate between the
//! registries, the backend gateway, and the reprojection capability, and
//! contain the domain logic.

pub mod collection;
pub mod job;
pub mod process_graph;

// Re-export for convenience
pub use collection as collection_service;
pub use job as job_service;
pub use process_graph as process_graph_service;
