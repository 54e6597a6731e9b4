use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::DataError;
use crate::resource;

/// A `[longitude, latitude]` pair as it appears in the boundary dataset.
pub type Position = [f64; 2];

/// The U.S. states and territories boundary dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// One state or territory boundary. The feature `id` is a FIPS code string.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub id: Option<String>,
    #[serde(default)]
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

impl Geometry {
    /// The exterior and interior rings of the geometry, in dataset order.
    pub fn rings(&self) -> impl Iterator<Item = &[Position]> {
        match self {
            Geometry::Polygon { coordinates } => {
                Box::new(coordinates.iter().map(Vec::as_slice))
                    as Box<dyn Iterator<Item = &[Position]> + '_>
            }
            Geometry::MultiPolygon { coordinates } => Box::new(
                coordinates
                    .iter()
                    .flat_map(|polygon| polygon.iter().map(Vec::as_slice)),
            ),
        }
    }
}

/// The lon/lat bounding box of a feature collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

impl FeatureCollection {
    /// Computes the bounding box over every ring of every feature.
    /// An empty collection has no bounds.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;

        for feature in &self.features {
            for ring in feature.geometry.rings() {
                for &[lon, lat] in ring {
                    bounds = Some(match bounds {
                        None => Bounds {
                            min_lon: lon,
                            max_lon: lon,
                            min_lat: lat,
                            max_lat: lat,
                        },
                        Some(b) => Bounds {
                            min_lon: b.min_lon.min(lon),
                            max_lon: b.max_lon.max(lon),
                            min_lat: b.min_lat.min(lat),
                            max_lat: b.max_lat.max(lat),
                        },
                    });
                }
            }
        }

        bounds
    }
}

/// Reads the boundary dataset stored at `path/us-states.json`.
pub fn load_geometry(path: &Path) -> Result<FeatureCollection, DataError> {
    let file = File::open(path.join(resource::GEOMETRY_FILE_NAME))?;
    let collection = serde_json::from_reader(BufReader::new(file))?;

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_features() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": "36",
                    "properties": { "name": "New York" },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[-79.0, 40.5], [-71.8, 45.0], [-73.0, 40.5], [-79.0, 40.5]]]
                    }
                },
                {
                    "type": "Feature",
                    "id": "02",
                    "properties": { "name": "Alaska" },
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [[[[-170.0, 52.0], [-140.0, 71.0], [-165.0, 54.0], [-170.0, 52.0]]]]
                    }
                }
            ]
        }"#;

        let collection: FeatureCollection = serde_json::from_str(json).unwrap();
        let bounds = collection.bounds().unwrap();

        assert_eq!(bounds.min_lon, -170.0);
        assert_eq!(bounds.max_lon, -71.8);
        assert_eq!(bounds.min_lat, 40.5);
        assert_eq!(bounds.max_lat, 71.0);
    }

    #[test]
    fn empty_collections_have_no_bounds() {
        let collection = FeatureCollection { features: vec![] };

        assert!(collection.bounds().is_none());
    }
}
