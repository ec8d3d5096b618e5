//! Extent Reprojection
//!
//! Normalizes dataset extents from their native coordinate reference system
//! into EPSG:4326. The transform mathematics are delegated to `proj4rs`;
//! this module only handles descriptor normalization and corner assembly.
//!
//! The lower-left and upper-right corners are transformed independently and
//! reassembled into an axis-aligned box. For rotated or skewed transforms
//! the extremal corner can change, so the result is an approximation; this
//! is the driver's defined behavior.

use openeo_core::domain::collection::Extent;
use proj4rs::Proj;
use proj4rs::transform::transform;

const EPSG_4326: &str = "+proj=longlat +datum=WGS84 +no_defs";
const EPSG_3857: &str =
    "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs";

/// Reprojection failure modes
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("unsupported CRS descriptor: {0}")]
    UnsupportedCrs(String),
    #[error("coordinate transform failed: {0}")]
    Transform(#[from] proj4rs::errors::Error),
}

/// Reproject an extent from its native CRS into EPSG:4326.
///
/// The temporal component, if any, is carried through unchanged.
pub fn reproject_extent(native_crs: &str, extent: &Extent) -> Result<Extent, ProjectionError> {
    let proj_string = normalize_crs(native_crs)?;
    let source = Proj::from_proj_string(&proj_string)?;
    let target = Proj::from_proj_string(EPSG_4326)?;

    let [west, south, east, north] = extent.spatial;
    let lower_left = transform_point(&source, &target, west, south)?;
    let upper_right = transform_point(&source, &target, east, north)?;

    Ok(Extent {
        spatial: [lower_left.0, lower_left.1, upper_right.0, upper_right.1],
        temporal: extent.temporal.clone(),
    })
}

fn transform_point(
    source: &Proj,
    target: &Proj,
    x: f64,
    y: f64,
) -> Result<(f64, f64), ProjectionError> {
    // proj4rs expects geographic coordinates in radians. Asking the
    // constructed projection covers every alias of longlat, not just the
    // spellings a string match would catch.
    let mut point = if source.is_latlong() {
        (x.to_radians(), y.to_radians(), 0.0)
    } else {
        (x, y, 0.0)
    };

    transform(source, target, &mut point)?;

    // The target is always longlat, so results come back in radians.
    Ok((point.0.to_degrees(), point.1.to_degrees()))
}

/// Normalize a CRS descriptor into a proj string.
///
/// Accepted: `EPSG:<code>` for the codes the driver knows, and raw proj
/// strings. Anything else (WKT included) is unsupported.
fn normalize_crs(descriptor: &str) -> Result<String, ProjectionError> {
    let descriptor = descriptor.trim();

    if let Some(code) = descriptor
        .strip_prefix("EPSG:")
        .or_else(|| descriptor.strip_prefix("epsg:"))
    {
        return match code.trim() {
            "4326" => Ok(EPSG_4326.to_string()),
            "3857" => Ok(EPSG_3857.to_string()),
            _ => Err(ProjectionError::UnsupportedCrs(descriptor.to_string())),
        };
    }

    if descriptor.starts_with('+') {
        return Ok(descriptor.to_string());
    }

    Err(ProjectionError::UnsupportedCrs(descriptor.to_string()))
}
