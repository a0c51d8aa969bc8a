use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

const MAX_LATITUDE: f64 = 85.0511287798;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate from the engine's `[lng, lat]` pair
    pub fn from_lng_lat(lng_lat: [f64; 2]) -> Self {
        Self::new(lng_lat[1], lng_lat[0])
    }

    /// Returns the coordinate in the engine's `[lng, lat]` order
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }

    /// Returns self if valid, otherwise an `InvalidCoordinates` error
    pub fn validated(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(MapError::InvalidCoordinates(format!(
                "lat {} / lng {} is not a WGS84 pair",
                self.lat, self.lng
            )))
        }
    }

    /// Clamps latitude to the Web Mercator range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Checks if another bounds lies entirely within this one
    pub fn contains_bounds(&self, other: &LatLngBounds) -> bool {
        self.contains(&other.south_west) && self.contains(&other.north_east)
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Both corners are valid and south-west is not north or east of north-east
    pub fn is_valid(&self) -> bool {
        self.south_west.is_valid()
            && self.north_east.is_valid()
            && self.south_west.lat <= self.north_east.lat
            && self.south_west.lng <= self.north_east.lng
    }

    /// Clamps a point into the bounds
    pub fn clamp(&self, point: &LatLng) -> LatLng {
        LatLng::new(
            point.lat.clamp(self.south_west.lat, self.north_east.lat),
            point.lng.clamp(self.south_west.lng, self.north_east.lng),
        )
    }

    /// Engine representation: `[[west, south], [east, north]]`
    pub fn to_lng_lat_pairs(&self) -> [[f64; 2]; 2] {
        [self.south_west.to_lng_lat(), self.north_east.to_lng_lat()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(28.5964, -81.3014);
        assert_eq!(coord.lat, 28.5964);
        assert_eq!(coord.lng, -81.3014);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_lng_lat_order() {
        let coord = LatLng::from_lng_lat([-81.3014, 28.5964]);
        assert_eq!(coord.lat, 28.5964);
        assert_eq!(coord.to_lng_lat(), [-81.3014, 28.5964]);
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(LatLng::new(91.0, 0.0).validated().is_err());
        assert!(LatLng::new(0.0, -180.5).validated().is_err());
        assert!(LatLng::new(f64::NAN, 0.0).validated().is_err());
    }

    #[test]
    fn test_bounds_contains_and_clamp() {
        let bounds = LatLngBounds::from_coords(28.585, -81.315, 28.6025, -81.29);
        assert!(bounds.contains(&LatLng::new(28.5964, -81.3014)));
        assert!(!bounds.contains(&LatLng::new(28.7, -81.3)));

        let clamped = bounds.clamp(&LatLng::new(28.7, -81.4));
        assert_eq!(clamped, LatLng::new(28.6025, -81.315));
    }

    #[test]
    fn test_inverted_bounds_are_invalid() {
        let bounds = LatLngBounds::from_coords(28.6, -81.3, 28.5, -81.2);
        assert!(!bounds.is_valid());
    }
}
