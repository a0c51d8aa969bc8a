//! Campus-wide defaults.
//! Keeping them in a single place makes it easier to tweak the magic numbers
//! the configuration falls back to.

/// Initial camera center as `[lng, lat]`.
pub const CAMPUS_CENTER: [f64; 2] = [-81.30256, 28.593765];

/// Initial zoom before the camera is fitted to the campus.
pub const INITIAL_ZOOM: f64 = 16.0;

/// Box the camera fits on load, `[[west, south], [east, north]]`.
pub const CAMPUS_FIT_BOUNDS: [[f64; 2]; 2] = [[-81.3060, 28.5905], [-81.2990, 28.5975]];

/// Pan limit, `[[west, south], [east, north]]`.
pub const CAMPUS_MAX_BOUNDS: [[f64; 2]; 2] = [[-81.3150, 28.5850], [-81.2900, 28.6025]];

/// Padding in pixels kept around the fitted box.
pub const FIT_PADDING: f64 = 40.0;

pub const MIN_ZOOM: f64 = 15.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Marker scale range, reached at `MIN_ZOOM` and `MAX_ZOOM` respectively.
pub const MARKER_MIN_SCALE: f64 = 0.6;
pub const MARKER_MAX_SCALE: f64 = 1.4;

/// Camera zoom after flying to a building.
pub const FLY_TO_ZOOM: f64 = 18.0;
pub const FLY_TO_SPEED: f64 = 1.2;
pub const FLY_TO_CURVE: f64 = 1.42;

pub const LINES_ENDPOINT: &str = "/osm_data/lines.json";
pub const POINTS_ENDPOINT: &str = "/osm_data/points.json";
pub const POLYGONS_ENDPOINT: &str = "/osm_data/polygons.json";

/// Source ids registered with the engine.
pub const LINES_SOURCE: &str = "lines";
pub const POINTS_SOURCE: &str = "points";
pub const POLYGONS_SOURCE: &str = "polygons";

/// Element that hosts the engine canvas.
pub const MAP_CONTAINER_ID: &str = "map";

/// Glyph atlas the symbol layers render labels with.
pub const GLYPHS_URL: &str = "mapbox://fonts/mapbox/{fontstack}/{range}.pbf";

/// Viewport size assumed by the headless engine, in pixels.
pub const HEADLESS_VIEWPORT_SIZE: (f64, f64) = (1280.0, 800.0);
