//! Building widgets: one marker per building, fly-to on click, rescale on zoom.

use crate::{
    animation::{marker_scale, FlyToOptions},
    core::config::{FlyToConfig, MarkerScaleConfig},
    data::buildings::BuildingTable,
    engine::{MapEngine, MarkerId, MarkerSpec},
    prelude::HashMap,
    MapError, Result,
};

/// Class carried by every building marker element
pub const WIDGET_CLASS: &str = "building-widget";

pub struct BuildingWidgets {
    buildings: BuildingTable,
    scale: MarkerScaleConfig,
    fly_to: FlyToConfig,
    markers: HashMap<String, MarkerId>,
    current_scale: Option<f64>,
}

impl BuildingWidgets {
    pub fn new(buildings: BuildingTable, scale: MarkerScaleConfig, fly_to: FlyToConfig) -> Self {
        Self {
            buildings,
            scale,
            fly_to,
            markers: HashMap::default(),
            current_scale: None,
        }
    }

    /// Creates a marker for every building that does not have one yet
    pub fn attach<E: MapEngine + ?Sized>(&mut self, engine: &mut E) -> Result<usize> {
        let mut attached = 0;
        for building in &self.buildings {
            if self.markers.contains_key(&building.name) {
                continue;
            }
            let spec = MarkerSpec {
                building: building.name.clone(),
                position: building.position(),
                class_name: WIDGET_CLASS.to_string(),
                label: building.name.clone(),
            };
            let id = engine.add_marker(&spec)?;
            self.markers.insert(building.name.clone(), id);
            attached += 1;
        }
        if attached > 0 {
            // new markers start unscaled
            self.current_scale = None;
        }
        log::debug!("attached {} building widgets", attached);
        Ok(attached)
    }

    pub fn marker(&self, building: &str) -> Option<MarkerId> {
        self.markers.get(building).copied()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Scale last applied to the markers
    pub fn current_scale(&self) -> Option<f64> {
        self.current_scale
    }

    /// Rescales every marker for `zoom`; unchanged scales are not re-sent
    pub fn rescale<E: MapEngine + ?Sized>(&mut self, engine: &mut E, zoom: f64) -> Result<f64> {
        let scale = marker_scale(zoom, &self.scale);
        if self.current_scale == Some(scale) {
            return Ok(scale);
        }
        for building in &self.buildings {
            if let Some(&id) = self.markers.get(&building.name) {
                engine.set_marker_scale(id, scale)?;
            }
        }
        self.current_scale = Some(scale);
        Ok(scale)
    }

    /// Flies the camera to the named building's coordinate
    pub fn fly_to<E: MapEngine + ?Sized>(
        &self,
        engine: &mut E,
        building: &str,
    ) -> Result<FlyToOptions> {
        let Some(entry) = self.buildings.get(building) else {
            log::warn!("no building widget named '{}'", building);
            return Err(MapError::UnknownBuilding(building.to_string()));
        };
        let options = FlyToOptions::to(entry.position(), &self.fly_to);
        engine.fly_to(&options)?;
        log::debug!("flying to '{}' at {:?}", building, entry.coordinates);
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::config::MapOptions,
        engine::headless::{EngineCommand, HeadlessEngine},
        layers::style::StyleDocument,
        LatLng,
    };

    fn setup() -> (HeadlessEngine, BuildingWidgets) {
        let options = MapOptions::default();
        let engine = HeadlessEngine::new(&options, &StyleDocument::base(&options));
        let widgets = BuildingWidgets::new(
            BuildingTable::default(),
            MarkerScaleConfig::default(),
            FlyToConfig::default(),
        );
        (engine, widgets)
    }

    #[test]
    fn test_attach_is_idempotent() {
        let (mut engine, mut widgets) = setup();
        assert_eq!(widgets.attach(&mut engine).unwrap(), 5);
        assert_eq!(widgets.attach(&mut engine).unwrap(), 0);
        assert_eq!(engine.markers().len(), 5);
        assert!(engine
            .markers()
            .iter()
            .all(|m| m.spec.class_name == WIDGET_CLASS));
    }

    #[test]
    fn test_fly_to_literal_coordinate() {
        let (mut engine, widgets) = setup();
        let options = widgets.fly_to(&mut engine, "Building 1").unwrap();

        assert_eq!(options.center.to_lng_lat(), [-81.3014, 28.5964]);
        assert_eq!(engine.center(), LatLng::new(28.5964, -81.3014));
    }

    #[test]
    fn test_unknown_building_does_not_move_camera() {
        let (mut engine, widgets) = setup();
        let before = engine.center();
        assert!(matches!(
            widgets.fly_to(&mut engine, "Observatory"),
            Err(MapError::UnknownBuilding(_))
        ));
        assert_eq!(engine.center(), before);
        assert!(engine.commands().is_empty());
    }

    #[test]
    fn test_rescale_skips_unchanged_scale() {
        let (mut engine, mut widgets) = setup();
        widgets.attach(&mut engine).unwrap();

        assert_eq!(widgets.rescale(&mut engine, 12.0).unwrap(), 0.6);
        let sent = engine.commands().len();
        widgets.rescale(&mut engine, 13.0).unwrap();
        assert_eq!(engine.commands().len(), sent);

        widgets.rescale(&mut engine, 19.0).unwrap();
        assert!(engine.markers().iter().all(|m| m.scale == 1.4));
        assert!(matches!(
            engine.commands().last(),
            Some(EngineCommand::SetMarkerScale(_, s)) if *s == 1.4
        ));
    }
}
