//! The mapping-engine seam.
//!
//! [`MapEngine`] is the slice of the engine API the campus map consumes.
//! Everything behind it (tiling, projection, gestures, style evaluation) is
//! the engine's business.

pub mod headless;

use crate::{
    animation::FlyToOptions,
    core::{
        config::MapOptions,
        geo::{LatLng, LatLngBounds},
    },
    layers::{
        base::{LayerSpec, SourceSpec},
        style::StyleDocument,
    },
    Result,
};

/// Handle to a marker owned by an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub usize);

/// DOM-backed marker pinned to a coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    /// Building the marker stands for; click events carry it back
    pub building: String,
    pub position: LatLng,
    /// Class of the marker's DOM element
    pub class_name: String,
    pub label: String,
}

pub trait MapEngine {
    /// Registers a data source
    fn add_source(&mut self, id: &str, source: &SourceSpec) -> Result<()>;

    /// Adds a layer on top of the current ones
    fn add_layer(&mut self, layer: &LayerSpec) -> Result<()>;

    /// Moves the camera so `bounds` fills the view less `padding` pixels
    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64) -> Result<()>;

    /// Limits panning to `bounds`
    fn set_max_bounds(&mut self, bounds: &LatLngBounds) -> Result<()>;

    fn set_min_zoom(&mut self, zoom: f64) -> Result<()>;

    fn set_max_zoom(&mut self, zoom: f64) -> Result<()>;

    /// Animates the camera to a new center and zoom
    fn fly_to(&mut self, options: &FlyToOptions) -> Result<()>;

    fn add_marker(&mut self, marker: &MarkerSpec) -> Result<MarkerId>;

    /// Scales the marker's visual element, leaving its anchor in place
    fn set_marker_scale(&mut self, marker: MarkerId, scale: f64) -> Result<()>;

    fn zoom(&self) -> f64;

    fn center(&self) -> LatLng;

    /// Destroys the instance and everything attached to it
    fn remove(&mut self) -> Result<()>;
}

/// Creates engine instances, one per map session
pub trait EngineFactory {
    type Engine: MapEngine;

    fn create(&mut self, options: &MapOptions, style: &StyleDocument) -> Result<Self::Engine>;
}
