//! # Campusmap
//!
//! An interactive campus map driven by an external mapping engine.
//!
//! The crate owns everything around the engine: the declarative style built
//! from OpenStreetMap GeoJSON exports, the viewport policy, the building
//! widgets and the landing/glossary/panel UI chrome. Rendering itself is
//! delegated to whatever implements [`engine::MapEngine`]: Mapbox GL in the
//! browser (feature `wasm`) or the in-memory [`engine::headless::HeadlessEngine`].

pub mod animation;
pub mod app;
pub mod core;
pub mod data;
pub mod engine;
pub mod layers;
pub mod prelude;
pub mod ui;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod web;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::CampusConfig,
    geo::{LatLng, LatLngBounds, Point},
    map::MapSession,
    viewport::{Viewport, ViewportController},
};

pub use app::{CampusApp, LoadTicket};

pub use engine::{headless::HeadlessEngine, EngineFactory, MapEngine};

pub use layers::{base::LayerSpec, manager::LayerManager, style::StyleDocument};

pub use data::{
    buildings::{Building, BuildingTable},
    fetcher::{CampusData, GeoJsonFetcher, LoadReport},
    geojson::FeatureCollection,
};

pub use ui::{dom::DomSurface, widget::BuildingWidgets};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Unknown building: {0}")]
    UnknownBuilding(String),

    #[error("Unknown panel: {0}")]
    UnknownPanel(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
