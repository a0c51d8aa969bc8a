//! In-memory engine for tests, the CLI and server-side style builds.
//!
//! It keeps the style document, markers and a [`Viewport`] camera, enforces
//! the same preconditions a real engine does (unique ids, known sources,
//! zoom limits, pan limit) and records every command in call order.
//! Camera moves take effect immediately.

use crate::{
    animation::FlyToOptions,
    core::{
        config::MapOptions,
        geo::{LatLng, LatLngBounds, Point},
        viewport::Viewport,
    },
    engine::{EngineFactory, MapEngine, MarkerId, MarkerSpec},
    layers::{
        base::{LayerSpec, SourceSpec},
        style::StyleDocument,
    },
    MapError, Result,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One call made on the engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    AddSource(String),
    AddLayer(String),
    FitBounds { bounds: LatLngBounds, padding: f64 },
    SetMaxBounds(LatLngBounds),
    SetMinZoom(f64),
    SetMaxZoom(f64),
    FlyTo(FlyToOptions),
    AddMarker(String),
    SetMarkerScale(MarkerId, f64),
    Remove,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMarker {
    pub spec: MarkerSpec,
    pub scale: f64,
}

#[derive(Debug)]
struct HeadlessState {
    instance: usize,
    style: StyleDocument,
    viewport: Viewport,
    markers: Vec<HeadlessMarker>,
    commands: Vec<EngineCommand>,
    removed: bool,
    lifecycle: Arc<Mutex<Vec<Lifecycle>>>,
}

/// Engine creation and removal events, shared across a factory's instances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created(usize),
    Removed(usize),
}

/// Cloneable handle; clones observe the same instance
#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    state: Arc<Mutex<HeadlessState>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl HeadlessEngine {
    pub fn new(options: &MapOptions, style: &StyleDocument) -> Self {
        Self::with_lifecycle(0, options, style, Arc::new(Mutex::new(Vec::new())))
    }

    fn with_lifecycle(
        instance: usize,
        options: &MapOptions,
        style: &StyleDocument,
        lifecycle: Arc<Mutex<Vec<Lifecycle>>>,
    ) -> Self {
        let size = Point::new(options.headless_size[0], options.headless_size[1]);
        lock(&lifecycle).push(Lifecycle::Created(instance));
        Self {
            state: Arc::new(Mutex::new(HeadlessState {
                instance,
                style: style.clone(),
                viewport: Viewport::new(options.center(), options.zoom, size),
                markers: Vec::new(),
                commands: Vec::new(),
                removed: false,
                lifecycle,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, HeadlessState> {
        lock(&self.state)
    }

    /// Locks the state for a command, failing once the instance is removed
    fn live(&self) -> Result<MutexGuard<'_, HeadlessState>> {
        let state = self.state();
        if state.removed {
            return Err(MapError::Engine(format!(
                "map instance #{} has been removed",
                state.instance
            )));
        }
        Ok(state)
    }

    pub fn instance(&self) -> usize {
        self.state().instance
    }

    pub fn is_removed(&self) -> bool {
        self.state().removed
    }

    pub fn commands(&self) -> Vec<EngineCommand> {
        self.state().commands.clone()
    }

    /// The style as it stands, sources and layers included
    pub fn style_snapshot(&self) -> StyleDocument {
        self.state().style.clone()
    }

    pub fn layer_ids(&self) -> Vec<String> {
        self.state().style.layers.iter().map(|l| l.id.clone()).collect()
    }

    pub fn source_ids(&self) -> Vec<String> {
        self.state().style.sources.keys().cloned().collect()
    }

    pub fn markers(&self) -> Vec<HeadlessMarker> {
        self.state().markers.clone()
    }

    pub fn viewport(&self) -> Viewport {
        self.state().viewport.clone()
    }

    /// Simulates a user zoom gesture, honouring the zoom limits
    pub fn zoom_to(&self, zoom: f64) {
        self.state().viewport.set_zoom(zoom);
    }
}

impl MapEngine for HeadlessEngine {
    fn add_source(&mut self, id: &str, source: &SourceSpec) -> Result<()> {
        let mut state = self.live()?;
        state.style.add_source(id, source.clone())?;
        state.commands.push(EngineCommand::AddSource(id.to_string()));
        Ok(())
    }

    fn add_layer(&mut self, layer: &LayerSpec) -> Result<()> {
        let mut state = self.live()?;
        state.style.add_layer(layer.clone())?;
        state.commands.push(EngineCommand::AddLayer(layer.id.clone()));
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64) -> Result<()> {
        if !bounds.is_valid() {
            return Err(MapError::InvalidCoordinates(format!("{:?}", bounds)));
        }
        let mut state = self.live()?;
        state.viewport.fit_bounds(bounds, padding);
        state.commands.push(EngineCommand::FitBounds {
            bounds: bounds.clone(),
            padding,
        });
        Ok(())
    }

    fn set_max_bounds(&mut self, bounds: &LatLngBounds) -> Result<()> {
        if !bounds.is_valid() {
            return Err(MapError::InvalidCoordinates(format!("{:?}", bounds)));
        }
        let mut state = self.live()?;
        state.viewport.set_max_bounds(Some(bounds.clone()));
        state.commands.push(EngineCommand::SetMaxBounds(bounds.clone()));
        Ok(())
    }

    fn set_min_zoom(&mut self, zoom: f64) -> Result<()> {
        let mut state = self.live()?;
        let max_zoom = state.viewport.max_zoom;
        if zoom > max_zoom {
            return Err(MapError::Engine(format!(
                "min zoom {} exceeds max zoom {}",
                zoom, max_zoom
            )));
        }
        state.viewport.set_zoom_limits(zoom, max_zoom);
        state.commands.push(EngineCommand::SetMinZoom(zoom));
        Ok(())
    }

    fn set_max_zoom(&mut self, zoom: f64) -> Result<()> {
        let mut state = self.live()?;
        let min_zoom = state.viewport.min_zoom;
        if zoom < min_zoom {
            return Err(MapError::Engine(format!(
                "max zoom {} is below min zoom {}",
                zoom, min_zoom
            )));
        }
        state.viewport.set_zoom_limits(min_zoom, zoom);
        state.commands.push(EngineCommand::SetMaxZoom(zoom));
        Ok(())
    }

    fn fly_to(&mut self, options: &FlyToOptions) -> Result<()> {
        let center = options.center.validated()?;
        let mut state = self.live()?;
        state.viewport.jump_to(center, options.zoom);
        state.commands.push(EngineCommand::FlyTo(*options));
        Ok(())
    }

    fn add_marker(&mut self, marker: &MarkerSpec) -> Result<MarkerId> {
        let position = marker.position.validated()?;
        let mut state = self.live()?;
        let id = MarkerId(state.markers.len());
        state.markers.push(HeadlessMarker {
            spec: MarkerSpec {
                position,
                ..marker.clone()
            },
            scale: 1.0,
        });
        state
            .commands
            .push(EngineCommand::AddMarker(marker.building.clone()));
        Ok(id)
    }

    fn set_marker_scale(&mut self, marker: MarkerId, scale: f64) -> Result<()> {
        let mut state = self.live()?;
        let entry = state
            .markers
            .get_mut(marker.0)
            .ok_or_else(|| MapError::Engine(format!("unknown marker {:?}", marker)))?;
        entry.scale = scale;
        state.commands.push(EngineCommand::SetMarkerScale(marker, scale));
        Ok(())
    }

    fn zoom(&self) -> f64 {
        self.state().viewport.zoom
    }

    fn center(&self) -> LatLng {
        self.state().viewport.center
    }

    fn remove(&mut self) -> Result<()> {
        let mut state = self.live()?;
        state.removed = true;
        state.markers.clear();
        state.commands.push(EngineCommand::Remove);
        let instance = state.instance;
        lock(&state.lifecycle).push(Lifecycle::Removed(instance));
        Ok(())
    }
}

/// Hands out numbered headless engines and keeps a handle to each
#[derive(Debug, Clone, Default)]
pub struct HeadlessFactory {
    engines: Arc<Mutex<Vec<HeadlessEngine>>>,
    lifecycle: Arc<Mutex<Vec<Lifecycle>>>,
}

impl HeadlessFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every engine created so far, oldest first
    pub fn engines(&self) -> Vec<HeadlessEngine> {
        lock(&self.engines).clone()
    }

    pub fn latest(&self) -> Option<HeadlessEngine> {
        lock(&self.engines).last().cloned()
    }

    /// Creation and removal events across all instances, in order
    pub fn lifecycle(&self) -> Vec<Lifecycle> {
        lock(&self.lifecycle).clone()
    }
}

impl EngineFactory for HeadlessFactory {
    type Engine = HeadlessEngine;

    fn create(&mut self, options: &MapOptions, style: &StyleDocument) -> Result<HeadlessEngine> {
        let mut engines = lock(&self.engines);
        let engine =
            HeadlessEngine::with_lifecycle(engines.len(), options, style, self.lifecycle.clone());
        engines.push(engine.clone());
        log::debug!("created headless engine #{}", engines.len() - 1);
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::config::FlyToConfig, data::geojson::FeatureCollection, layers::base::LayerType,
    };

    fn engine() -> HeadlessEngine {
        let options = MapOptions::default();
        HeadlessEngine::new(&options, &StyleDocument::base(&options))
    }

    #[test]
    fn test_clones_share_state() {
        let mut engine = engine();
        let observer = engine.clone();
        engine
            .add_source("lines", &SourceSpec::geojson(FeatureCollection::empty()))
            .unwrap();
        assert_eq!(observer.source_ids(), vec!["lines".to_string()]);
    }

    #[test]
    fn test_layer_with_unknown_source_is_rejected() {
        let mut engine = engine();
        let layer = LayerSpec::new("roads", LayerType::Line).source("lines");
        assert!(engine.add_layer(&layer).is_err());
        assert!(engine.commands().is_empty());
    }

    #[test]
    fn test_fly_to_respects_zoom_limits_and_bounds() {
        let mut engine = engine();
        engine.set_min_zoom(15.0).unwrap();
        engine.set_max_zoom(19.0).unwrap();
        let bounds = LatLngBounds::from_coords(28.585, -81.315, 28.6025, -81.29);
        engine.set_max_bounds(&bounds).unwrap();

        let mut options = FlyToOptions::to(LatLng::new(28.5964, -81.3014), &FlyToConfig::default());
        options.zoom = 21.0;
        engine.fly_to(&options).unwrap();

        assert_eq!(engine.zoom(), 19.0);
        assert_eq!(engine.center(), LatLng::new(28.5964, -81.3014));
    }

    #[test]
    fn test_inverted_zoom_limits_rejected() {
        let mut engine = engine();
        engine.set_max_zoom(17.0).unwrap();
        assert!(engine.set_min_zoom(18.0).is_err());
    }

    #[test]
    fn test_removed_engine_refuses_commands() {
        let mut engine = engine();
        engine.remove().unwrap();
        assert!(engine.is_removed());
        assert!(engine.set_min_zoom(10.0).is_err());
        assert!(engine.remove().is_err());
    }

    #[test]
    fn test_factory_numbers_instances() {
        let mut factory = HeadlessFactory::new();
        let options = MapOptions::default();
        let style = StyleDocument::base(&options);
        let mut first = factory.create(&options, &style).unwrap();
        first.remove().unwrap();
        let second = factory.create(&options, &style).unwrap();

        assert_eq!(second.instance(), 1);
        assert_eq!(
            factory.lifecycle(),
            vec![Lifecycle::Created(0), Lifecycle::Removed(0), Lifecycle::Created(1)]
        );
    }
}
