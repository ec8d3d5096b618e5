//! Collection domain types

use serde::{Deserialize, Serialize};

/// Spatial (and optionally temporal) extent of a dataset
///
/// `spatial` is `[west, south, east, north]`. In outward-facing records the
/// box is always expressed in EPSG:4326; `temporal` is present exactly for
/// space-time raster datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub spatial: [f64; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<(String, String)>,
}

impl Extent {
    /// Purely spatial extent.
    pub fn spatial(spatial: [f64; 4]) -> Self {
        Self {
            spatial,
            temporal: None,
        }
    }
}

/// Canonical catalog entry for a backend dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInformation {
    pub name: String,
    pub title: String,
    pub description: String,
    pub extent: Extent,
}

/// Dataset kind as addressed in the backend
///
/// Anything the driver does not recognize falls back to `Unknown` and is
/// presented as a plain raster dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datatype {
    Raster,
    Strds,
    Vector,
    Unknown(String),
}

impl Datatype {
    /// Parse the datatype component of a dataset name (case-insensitive).
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "raster" => Self::Raster,
            "strds" => Self::Strds,
            "vector" => Self::Vector,
            _ => Self::Unknown(s.to_string()),
        }
    }

    /// Human label used as the collection title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Strds => "Space time raster dataset",
            Self::Vector => "Vector dataset",
            Self::Raster | Self::Unknown(_) => "Raster dataset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_titles() {
        assert_eq!(Datatype::parse("strds").title(), "Space time raster dataset");
        assert_eq!(Datatype::parse("STRDS").title(), "Space time raster dataset");
        assert_eq!(Datatype::parse("vector").title(), "Vector dataset");
        assert_eq!(Datatype::parse("raster").title(), "Raster dataset");
        // Unrecognized kinds keep the lenient raster fallback.
        assert_eq!(Datatype::parse("raster_3d").title(), "Raster dataset");
    }

    #[test]
    fn test_extent_serialization() {
        let extent = Extent::spatial([-40.5, 25.25, 75.5, 75.5]);
        let json = serde_json::to_value(&extent).unwrap();
        assert_eq!(json["spatial"], serde_json::json!([-40.5, 25.25, 75.5, 75.5]));
        assert!(json.get("temporal").is_none());

        let extent = Extent {
            temporal: Some(("1950-01-01 00:00:00".into(), "2013-07-01 00:00:00".into())),
            ..extent
        };
        let json = serde_json::to_value(&extent).unwrap();
        assert_eq!(json["temporal"][0], "1950-01-01 00:00:00");
    }
}
