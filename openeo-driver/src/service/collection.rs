//! Collection Service
//!
//! Assembles canonical `CollectionInformation` records from the raw catalog
//! metadata the backend reports for raster, vector, and space-time raster
//! datasets. All backend fetches complete before anything is assembled;
//! nothing on this path touches a registry.

use std::collections::HashMap;

use openeo_core::domain::collection::{CollectionInformation, Datatype, Extent};

use crate::gateway::{BackendGateway, GatewayError};
use crate::projection::{self, ProjectionError};

/// Service error type
#[derive(Debug)]
pub enum CollectionError {
    Gateway(GatewayError),
    MalformedMetadata(String),
    Projection(ProjectionError),
}

impl From<GatewayError> for CollectionError {
    fn from(err: GatewayError) -> Self {
        CollectionError::Gateway(err)
    }
}

impl From<ProjectionError> for CollectionError {
    fn from(err: ProjectionError) -> Self {
        CollectionError::Projection(err)
    }
}

/// Describe a dataset as a canonical collection record
///
/// The spatial extent is reprojected from the mapset's native projection
/// into EPSG:4326; the temporal interval is attached exactly for space-time
/// raster datasets.
pub async fn describe(
    gateway: &dyn BackendGateway,
    name: &str,
) -> Result<CollectionInformation, CollectionError> {
    let address = gateway.resolve(name)?;

    let layer_data = gateway.layer_info(name).await?;
    let mapset_data = gateway
        .mapset_info(&address.location, &address.mapset)
        .await?;

    let mut extent = Extent::spatial([
        required_f64(&layer_data, "west")?,
        required_f64(&layer_data, "south")?,
        required_f64(&layer_data, "east")?,
        required_f64(&layer_data, "north")?,
    ]);

    if address.datatype == Datatype::Strds {
        extent.temporal = Some((
            required_str(&layer_data, "start_time")?.to_string(),
            required_str(&layer_data, "end_time")?.to_string(),
        ));
    }

    let native_crs = required_str(&mapset_data, "projection")?;
    let extent = projection::reproject_extent(native_crs, &extent)?;

    tracing::debug!("Assembled collection metadata for {}", name);

    Ok(CollectionInformation {
        name: name.to_string(),
        title: address.datatype.title().to_string(),
        description: format!(
            "GRASS GIS location/mapset path: /{}/{}",
            address.location, address.mapset
        ),
        extent,
    })
}

// =============================================================================
// Metadata Parsing
// =============================================================================

fn required_str<'a>(
    data: &'a HashMap<String, String>,
    key: &str,
) -> Result<&'a str, CollectionError> {
    data.get(key)
        .map(String::as_str)
        .ok_or_else(|| CollectionError::MalformedMetadata(format!("missing field <{key}>")))
}

fn required_f64(data: &HashMap<String, String>, key: &str) -> Result<f64, CollectionError> {
    required_str(data, key)?.parse::<f64>().map_err(|_| {
        CollectionError::MalformedMetadata(format!("field <{key}> is not numeric"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockGateway {
        layer: HashMap<String, String>,
        mapset: HashMap<String, String>,
        mapset_failure: Option<(u16, String)>,
    }

    impl MockGateway {
        fn new(layer: &[(&str, &str)]) -> Self {
            Self {
                layer: to_map(layer),
                mapset: to_map(&[("projection", "EPSG:4326")]),
                mapset_failure: None,
            }
        }
    }

    fn to_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[async_trait]
    impl BackendGateway for MockGateway {
        async fn layer_info(&self, _name: &str) -> Result<HashMap<String, String>, GatewayError> {
            Ok(self.layer.clone())
        }

        async fn mapset_info(
            &self,
            _location: &str,
            _mapset: &str,
        ) -> Result<HashMap<String, String>, GatewayError> {
            if let Some((status, message)) = &self.mapset_failure {
                return Err(GatewayError::Backend {
                    status: *status,
                    message: message.clone(),
                });
            }
            Ok(self.mapset.clone())
        }
    }

    fn strds_layer() -> Vec<(&'static str, &'static str)> {
        vec![
            ("west", "-40.5"),
            ("south", "25.25"),
            ("east", "75.5"),
            ("north", "75.5"),
            ("start_time", "1950-01-01 00:00:00"),
            ("end_time", "2013-07-01 00:00:00"),
        ]
    }

    #[tokio::test]
    async fn test_describe_strds_attaches_temporal() {
        let gateway = MockGateway::new(&strds_layer());
        let info = describe(
            &gateway,
            "latlong.PERMANENT.strds.precipitation_1950_2013_monthly_mm",
        )
        .await
        .unwrap();

        assert_eq!(info.title, "Space time raster dataset");
        assert_eq!(
            info.description,
            "GRASS GIS location/mapset path: /latlong/PERMANENT"
        );
        assert_eq!(info.extent.spatial, [-40.5, 25.25, 75.5, 75.5]);
        assert_eq!(
            info.extent.temporal,
            Some(("1950-01-01 00:00:00".into(), "2013-07-01 00:00:00".into()))
        );
    }

    #[tokio::test]
    async fn test_describe_raster_has_no_temporal() {
        let gateway = MockGateway::new(&[
            ("west", "630000"),
            ("south", "215000"),
            ("east", "645000"),
            ("north", "228500"),
        ]);
        let info = describe(&gateway, "nc_spm_08.PERMANENT.raster.elevation")
            .await
            .unwrap();

        assert_eq!(info.title, "Raster dataset");
        assert!(info.extent.temporal.is_none());
    }

    #[tokio::test]
    async fn test_describe_vector_title() {
        let gateway = MockGateway::new(&[
            ("west", "-10"),
            ("south", "-10"),
            ("east", "10"),
            ("north", "10"),
        ]);
        let info = describe(&gateway, "nc_spm_08.PERMANENT.vector.roads")
            .await
            .unwrap();
        assert_eq!(info.title, "Vector dataset");
        assert!(info.extent.temporal.is_none());
    }

    #[tokio::test]
    async fn test_backend_failure_carries_status() {
        let mut gateway = MockGateway::new(&strds_layer());
        gateway.mapset_failure = Some((400, "mapset lookup failed".to_string()));

        let err = describe(&gateway, "latlong.PERMANENT.strds.precip")
            .await
            .unwrap_err();
        match err {
            CollectionError::Gateway(GatewayError::Backend { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "mapset lookup failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_bound_is_malformed() {
        let gateway = MockGateway::new(&[
            ("south", "25.25"),
            ("east", "75.5"),
            ("north", "75.5"),
        ]);
        let err = describe(&gateway, "latlong.PERMANENT.raster.precip")
            .await
            .unwrap_err();
        assert!(matches!(err, CollectionError::MalformedMetadata(_)));
    }

    #[tokio::test]
    async fn test_non_numeric_bound_is_malformed() {
        let gateway = MockGateway::new(&[
            ("west", "not-a-number"),
            ("south", "25.25"),
            ("east", "75.5"),
            ("north", "75.5"),
        ]);
        let err = describe(&gateway, "latlong.PERMANENT.raster.precip")
            .await
            .unwrap_err();
        assert!(matches!(err, CollectionError::MalformedMetadata(_)));
    }

    #[tokio::test]
    async fn test_missing_projection_is_malformed() {
        let mut gateway = MockGateway::new(&[
            ("west", "-10"),
            ("south", "-10"),
            ("east", "10"),
            ("north", "10"),
        ]);
        gateway.mapset = to_map(&[]);

        let err = describe(&gateway, "nc_spm_08.PERMANENT.raster.elevation")
            .await
            .unwrap_err();
        assert!(matches!(err, CollectionError::MalformedMetadata(_)));
    }

    #[tokio::test]
    async fn test_unresolvable_name_fails() {
        let gateway = MockGateway::new(&strds_layer());
        let err = describe(&gateway, "elevation").await.unwrap_err();
        assert!(matches!(
            err,
            CollectionError::Gateway(GatewayError::Resolution(_))
        ));
    }
}
