//! Configuration for the campus map
//!
//! Every section falls back to the values in [`crate::core::constants`], so a
//! config file only needs to name what it changes. The whole tree is loaded
//! from JSON and checked with [`CampusConfig::validate`] before use.

use crate::{
    core::{
        constants,
        geo::{LatLng, LatLngBounds},
    },
    data::buildings::BuildingTable,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CampusConfig {
    pub map: MapOptions,
    pub viewport: ViewportConfig,
    pub data: DataEndpoints,
    pub markers: MarkerScaleConfig,
    pub fly_to: FlyToConfig,
    pub buildings: BuildingTable,
}

impl CampusConfig {
    /// Parses and validates a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CampusConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("loading campus config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Checks cross-field invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.map.center().validated()?;
        self.viewport.validate()?;
        self.markers.validate()?;

        let (min_zoom, max_zoom) = (self.viewport.min_zoom, self.viewport.max_zoom);
        if self.fly_to.zoom < min_zoom || self.fly_to.zoom > max_zoom {
            return Err(MapError::Config(format!(
                "fly-to zoom {} lies outside the zoom range [{}, {}]",
                self.fly_to.zoom, min_zoom, max_zoom
            )));
        }
        if self.fly_to.speed <= 0.0 {
            return Err(MapError::Config("fly-to speed must be positive".into()));
        }

        self.buildings.validate()?;
        let max_bounds = self.viewport.max_bounds();
        for building in &self.buildings {
            if !max_bounds.contains(&building.position()) {
                log::warn!(
                    "building '{}' lies outside the pan limit and cannot be reached",
                    building.name
                );
            }
        }
        Ok(())
    }
}

/// Engine construction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Id of the element hosting the map canvas
    pub container: String,
    /// Engine access token, if the engine needs one
    pub access_token: Option<String>,
    /// Initial center as `[lng, lat]`
    pub center: [f64; 2],
    pub zoom: f64,
    /// Background layer color
    pub background_color: String,
    /// Canvas size assumed when no real canvas exists
    pub headless_size: [f64; 2],
}

impl MapOptions {
    pub fn center(&self) -> LatLng {
        LatLng::from_lng_lat(self.center)
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            container: constants::MAP_CONTAINER_ID.to_string(),
            access_token: None,
            center: constants::CAMPUS_CENTER,
            zoom: constants::INITIAL_ZOOM,
            background_color: "#f2efe9".to_string(),
            headless_size: [
                constants::HEADLESS_VIEWPORT_SIZE.0,
                constants::HEADLESS_VIEWPORT_SIZE.1,
            ],
        }
    }
}

/// Camera policy applied once the data is installed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// `[[west, south], [east, north]]` box the camera fits to
    pub fit_bounds: [[f64; 2]; 2],
    pub padding: f64,
    /// `[[west, south], [east, north]]` pan limit
    pub max_bounds: [[f64; 2]; 2],
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl ViewportConfig {
    pub fn fit_bounds(&self) -> LatLngBounds {
        bounds_from_pairs(self.fit_bounds)
    }

    pub fn max_bounds(&self) -> LatLngBounds {
        bounds_from_pairs(self.max_bounds)
    }

    pub fn validate(&self) -> Result<()> {
        let fit = self.fit_bounds();
        let max = self.max_bounds();
        if !fit.is_valid() {
            return Err(MapError::Config(format!("invalid fit bounds {:?}", self.fit_bounds)));
        }
        if !max.is_valid() {
            return Err(MapError::Config(format!("invalid max bounds {:?}", self.max_bounds)));
        }
        if !max.contains_bounds(&fit) {
            return Err(MapError::Config(
                "fit bounds must lie inside the max bounds".into(),
            ));
        }
        if !(0.0..=24.0).contains(&self.min_zoom) || !(0.0..=24.0).contains(&self.max_zoom) {
            return Err(MapError::Config("zoom limits must lie in [0, 24]".into()));
        }
        if self.min_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "min zoom {} exceeds max zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.padding < 0.0 {
            return Err(MapError::Config("padding must not be negative".into()));
        }
        Ok(())
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            fit_bounds: constants::CAMPUS_FIT_BOUNDS,
            padding: constants::FIT_PADDING,
            max_bounds: constants::CAMPUS_MAX_BOUNDS,
            min_zoom: constants::MIN_ZOOM,
            max_zoom: constants::MAX_ZOOM,
        }
    }
}

fn bounds_from_pairs(pairs: [[f64; 2]; 2]) -> LatLngBounds {
    LatLngBounds::new(LatLng::from_lng_lat(pairs[0]), LatLng::from_lng_lat(pairs[1]))
}

/// Relative locations of the three OSM exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataEndpoints {
    pub lines: String,
    pub points: String,
    pub polygons: String,
}

impl Default for DataEndpoints {
    fn default() -> Self {
        Self {
            lines: constants::LINES_ENDPOINT.to_string(),
            points: constants::POINTS_ENDPOINT.to_string(),
            polygons: constants::POLYGONS_ENDPOINT.to_string(),
        }
    }
}

/// Zoom range over which building markers grow, and the scales at either end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerScaleConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl MarkerScaleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_zoom > self.max_zoom {
            return Err(MapError::Config("marker min zoom exceeds max zoom".into()));
        }
        if self.min_scale <= 0.0 || self.min_scale > self.max_scale {
            return Err(MapError::Config(format!(
                "marker scale range [{}, {}] is invalid",
                self.min_scale, self.max_scale
            )));
        }
        Ok(())
    }
}

impl Default for MarkerScaleConfig {
    fn default() -> Self {
        Self {
            min_zoom: constants::MIN_ZOOM,
            max_zoom: constants::MAX_ZOOM,
            min_scale: constants::MARKER_MIN_SCALE,
            max_scale: constants::MARKER_MAX_SCALE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyToConfig {
    pub zoom: f64,
    pub speed: f64,
    pub curve: f64,
    /// Animate even when the user prefers reduced motion
    pub essential: bool,
}

impl Default for FlyToConfig {
    fn default() -> Self {
        Self {
            zoom: constants::FLY_TO_ZOOM,
            speed: constants::FLY_TO_SPEED,
            curve: constants::FLY_TO_CURVE,
            essential: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CampusConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.data.lines, "/osm_data/lines.json");
        assert_eq!(config.markers.min_scale, 0.6);
        assert_eq!(config.markers.max_scale, 1.4);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = CampusConfig::from_json_str(
            r#"{ "map": { "access_token": "pk.test" }, "viewport": { "max_zoom": 18.5 } }"#,
        )
        .unwrap();

        assert_eq!(config.map.access_token.as_deref(), Some("pk.test"));
        assert_eq!(config.map.container, "map");
        assert_eq!(config.viewport.max_zoom, 18.5);
        assert_eq!(config.viewport.min_zoom, constants::MIN_ZOOM);
        assert_eq!(config.buildings.len(), BuildingTable::default().len());
    }

    #[test]
    fn test_custom_buildings_replace_defaults() {
        let config = CampusConfig::from_json_str(
            r#"{ "buildings": [ { "name": "Gym", "coordinates": [-81.302, 28.594] } ] }"#,
        )
        .unwrap();

        assert_eq!(config.buildings.names(), vec!["Gym"]);
    }

    #[test]
    fn test_inverted_zoom_range_rejected() {
        let result = CampusConfig::from_json_str(
            r#"{ "viewport": { "min_zoom": 18.0, "max_zoom": 16.0 } }"#,
        );
        assert!(matches!(result, Err(MapError::Config(_))));
    }

    #[test]
    fn test_fit_outside_max_bounds_rejected() {
        let mut config = CampusConfig::default();
        config.viewport.fit_bounds = [[-81.40, 28.50], [-81.20, 28.70]];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fly_to_zoom_must_be_reachable() {
        let mut config = CampusConfig::default();
        config.fly_to.zoom = 21.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let result = CampusConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(MapError::Serialization(_))));
    }
}
