//! Capability API Handlers
//!
//! Static openEO discovery documents: the capability listing, service
//! types, and supported output formats.

use axum::Json;

/// GET /capabilities
/// openEO capability document for this driver
pub async fn capabilities() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "version": "0.3.0",
        "endpoints": [
            {"path": "/capabilities", "methods": ["GET"]},
            {"path": "/service_types", "methods": ["GET"]},
            {"path": "/output_formats", "methods": ["GET"]},
            {"path": "/collections/{name}", "methods": ["GET"]},
            {"path": "/jobs", "methods": ["GET", "POST", "DELETE"]},
            {"path": "/jobs/{job_id}", "methods": ["GET"]},
            {"path": "/process_graphs/{name}", "methods": ["GET", "PUT", "DELETE"]}
        ]
    }))
}

/// GET /service_types
/// No secondary web services are offered by this driver
pub async fn service_types() -> Json<serde_json::Value> {
    Json(serde_json::json!({}))
}

/// GET /output_formats
/// Supported output formats for job results
pub async fn output_formats() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "default": "GTiff",
        "formats": {
            "GTiff": {
                "gis_data_types": ["raster"],
                "parameters": {
                    "compress": {
                        "type": "string",
                        "description": "Set the compression to use.",
                        "default": "LZW",
                        "enum": ["LZW"]
                    }
                }
            }
        }
    }))
}
