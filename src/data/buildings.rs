//! Building name to coordinate table.
//!
//! The same table drives marker placement and the fly-to buttons, so a
//! building is reachable from the UI exactly when it has a marker.

use crate::{core::geo::LatLng, MapError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A named campus building and where it sits, as a GeoJSON-style `[lng, lat]` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub name: String,
    pub coordinates: [f64; 2],
}

impl Building {
    pub fn new(name: impl Into<String>, coordinates: [f64; 2]) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::from_lng_lat(self.coordinates)
    }
}

static DEFAULT_BUILDINGS: Lazy<Vec<Building>> = Lazy::new(|| {
    vec![
        Building::new("Building 1", [-81.3014, 28.5964]),
        Building::new("Building 2", [-81.3021, 28.5951]),
        Building::new("Building 3", [-81.3032, 28.5940]),
        Building::new("Library", [-81.3009, 28.5938]),
        Building::new("Student Center", [-81.3027, 28.5929]),
    ]
});

/// Ordered table of buildings, looked up by exact name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingTable {
    buildings: Vec<Building>,
}

impl BuildingTable {
    pub fn new(buildings: Vec<Building>) -> Self {
        Self { buildings }
    }

    pub fn get(&self, name: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.buildings.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Every coordinate is a WGS84 pair and no name appears twice
    pub fn validate(&self) -> Result<()> {
        for (i, building) in self.buildings.iter().enumerate() {
            if building.name.trim().is_empty() {
                return Err(MapError::Config(format!("building #{} has an empty name", i)));
            }
            building.position().validated().map_err(|e| {
                MapError::Config(format!("building '{}': {}", building.name, e))
            })?;
            if self.buildings[..i].iter().any(|b| b.name == building.name) {
                return Err(MapError::Config(format!(
                    "building '{}' is listed twice",
                    building.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for BuildingTable {
    fn default() -> Self {
        Self::new(DEFAULT_BUILDINGS.clone())
    }
}

impl<'a> IntoIterator for &'a BuildingTable {
    type Item = &'a Building;
    type IntoIter = std::slice::Iter<'a, Building>;

    fn into_iter(self) -> Self::IntoIter {
        self.buildings.iter()
    }
}
