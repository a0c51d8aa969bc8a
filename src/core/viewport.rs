use crate::{
    core::{
        config::ViewportConfig,
        geo::{LatLng, LatLngBounds, Point},
    },
    engine::MapEngine,
    Result,
};
use serde::{Deserialize, Serialize};

const EARTH_RADIUS: f64 = 6378137.0;
const TILE_SIZE: f64 = 256.0;

/// Camera model: center, zoom, screen size, zoom limits and pan limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// Maximum bounds for the map
    max_bounds: Option<LatLngBounds>,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, 22.0),
            size,
            min_zoom: 0.0,
            max_zoom: 22.0,
            max_bounds: None,
        }
    }

    /// Sets the maximum bounds for the map, pulling the center inside them
    pub fn set_max_bounds(&mut self, bounds: Option<LatLngBounds>) {
        self.max_bounds = bounds;
        self.center = self.clamp_center(self.center);
    }

    /// Get the maximum bounds for the map if set
    pub fn max_bounds(&self) -> Option<&LatLngBounds> {
        self.max_bounds.as_ref()
    }

    /// Sets the center of the viewport with bounds checking
    pub fn set_center(&mut self, center: LatLng) {
        self.center = self.clamp_center(center);
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Moves the camera without animation
    pub fn jump_to(&mut self, center: LatLng, zoom: f64) {
        self.set_zoom(zoom);
        self.set_center(center);
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    /// (Web Mercator, EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE * 2_f64.powf(z);
        let lat = LatLng::clamp_lat(lat_lng.lat);

        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = ((std::f64::consts::PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;

        let circumference = 2.0 * std::f64::consts::PI * EARTH_RADIUS;
        let pixel_x = (x + std::f64::consts::PI * EARTH_RADIUS) / circumference * scale;
        let pixel_y = (-y + std::f64::consts::PI * EARTH_RADIUS) / circumference * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Largest zoom at which `bounds` fits inside the viewport less `padding`
    /// on every side, clamped to the zoom limits
    pub fn fit_zoom(&self, bounds: &LatLngBounds, padding: f64) -> f64 {
        let nw = self.project(
            &LatLng::new(bounds.north_east.lat, bounds.south_west.lng),
            Some(0.0),
        );
        let se = self.project(
            &LatLng::new(bounds.south_west.lat, bounds.north_east.lng),
            Some(0.0),
        );
        let span = se.subtract(&nw);

        let available_x = (self.size.x - 2.0 * padding).max(1.0);
        let available_y = (self.size.y - 2.0 * padding).max(1.0);

        let scale_x = if span.x.abs() > 0.0 { available_x / span.x.abs() } else { f64::INFINITY };
        let scale_y = if span.y.abs() > 0.0 { available_y / span.y.abs() } else { f64::INFINITY };
        let scale = scale_x.min(scale_y);

        if scale.is_finite() {
            scale.log2().clamp(self.min_zoom, self.max_zoom)
        } else {
            self.max_zoom
        }
    }

    /// Fits the viewport to contain the given bounds
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64) {
        let zoom = self.fit_zoom(bounds, padding);
        self.jump_to(bounds.center(), zoom);
    }

    /// Clamps center to world bounds or max_bounds if set
    fn clamp_center(&self, center: LatLng) -> LatLng {
        match &self.max_bounds {
            Some(bounds) => bounds.clamp(&center),
            None => LatLng::new(LatLng::clamp_lat(center.lat), center.lng.clamp(-180.0, 180.0)),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

/// Applies the campus camera policy to an engine: zoom range, fitted view
/// and pan limit, in that order
pub struct ViewportController<'a> {
    config: &'a ViewportConfig,
}

impl<'a> ViewportController<'a> {
    pub fn new(config: &'a ViewportConfig) -> Self {
        Self { config }
    }

    pub fn apply<E>(&self, engine: &mut E) -> Result<()>
    where
        E: MapEngine + ?Sized,
    {
        engine.set_min_zoom(self.config.min_zoom)?;
        engine.set_max_zoom(self.config.max_zoom)?;
        engine.fit_bounds(&self.config.fit_bounds(), self.config.padding)?;
        engine.set_max_bounds(&self.config.max_bounds())?;
        log::debug!(
            "viewport fitted to {:?}, zoom range [{}, {}]",
            self.config.fit_bounds,
            self.config.min_zoom,
            self.config.max_zoom
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campus_viewport() -> Viewport {
        Viewport::new(
            LatLng::new(28.593765, -81.30256),
            16.0,
            Point::new(1280.0, 800.0),
        )
    }

    #[test]
    fn test_viewport_creation() {
        let viewport = campus_viewport();
        assert_eq!(viewport.zoom, 16.0);
        assert_eq!(viewport.center.lat, 28.593765);
        assert_eq!(viewport.size.x, 1280.0);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(15.0, 19.0);
        assert_eq!(viewport.zoom, 15.0);

        viewport.set_zoom(20.0); // Above maximum
        assert_eq!(viewport.zoom, 19.0);
    }

    #[test]
    fn test_max_bounds_clamp_center() {
        let mut viewport = campus_viewport();
        let bounds = LatLngBounds::from_coords(28.585, -81.315, 28.6025, -81.29);
        viewport.set_max_bounds(Some(bounds.clone()));

        viewport.set_center(LatLng::new(40.0, -74.0));
        assert!(bounds.contains(&viewport.center));
        assert_eq!(viewport.max_bounds(), Some(&bounds));
    }

    #[test]
    fn test_fit_bounds_centers_and_zooms() {
        let mut viewport = campus_viewport();
        let bounds = LatLngBounds::from_coords(28.5905, -81.3060, 28.5975, -81.2990);
        viewport.fit_bounds(&bounds, 40.0);

        assert!((viewport.center.lat - 28.594).abs() < 1e-9);
        assert!((viewport.center.lng - -81.3025).abs() < 1e-9);
        assert!(viewport.zoom > 16.5 && viewport.zoom < 17.5);

        // The fitted box must fit inside the padded viewport
        let nw = viewport.project(&LatLng::new(28.5975, -81.3060), None);
        let se = viewport.project(&LatLng::new(28.5905, -81.2990), None);
        assert!(se.x - nw.x <= 1280.0 - 80.0 + 1e-6);
        assert!(se.y - nw.y <= 800.0 - 80.0 + 1e-6);
    }

    #[test]
    fn test_larger_bounds_fit_at_lower_zoom() {
        let viewport = campus_viewport();
        let small = LatLngBounds::from_coords(28.5905, -81.3060, 28.5975, -81.2990);
        let large = LatLngBounds::from_coords(28.585, -81.315, 28.6025, -81.29);
        assert!(viewport.fit_zoom(&large, 40.0) < viewport.fit_zoom(&small, 40.0));
    }
}
