use crate::{
    animation::FlyToOptions,
    core::{
        config::{CampusConfig, ViewportConfig},
        viewport::ViewportController,
    },
    data::fetcher::{CampusData, LoadReport},
    engine::{EngineFactory, MapEngine},
    layers::{
        base::SourceSpec,
        campus::campus_layers,
        manager::AppliedLayers,
        style::StyleDocument,
    },
    ui::widget::BuildingWidgets,
    MapError, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Engine created with the base style, data not yet installed
    Created,
    Installed,
    /// Install stopped partway; the engine keeps what was added, so only a
    /// new session can load data again
    Failed,
    Removed,
}

/// One engine instance, from map-init to teardown
pub struct MapSession<E: MapEngine> {
    generation: u64,
    engine: E,
    viewport: ViewportConfig,
    widgets: BuildingWidgets,
    state: SessionState,
    applied: AppliedLayers,
}

impl<E: MapEngine> MapSession<E> {
    pub fn new(engine: E, config: &CampusConfig, generation: u64) -> Self {
        Self {
            generation,
            engine,
            viewport: config.viewport.clone(),
            widgets: BuildingWidgets::new(
                config.buildings.clone(),
                config.markers,
                config.fly_to,
            ),
            state: SessionState::Created,
            applied: AppliedLayers::default(),
        }
    }

    /// Creates the engine through `factory` with the base style
    pub fn create<F>(factory: &mut F, config: &CampusConfig, generation: u64) -> Result<Self>
    where
        F: EngineFactory<Engine = E>,
    {
        let style = StyleDocument::base(&config.map);
        let engine = factory.create(&config.map, &style)?;
        log::info!("map session #{} created", generation);
        Ok(Self::new(engine, config, generation))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn widgets(&self) -> &BuildingWidgets {
        &self.widgets
    }

    /// Layers added and skipped by [`MapSession::install`]
    pub fn applied_layers(&self) -> &AppliedLayers {
        &self.applied
    }

    fn ensure_live(&self) -> Result<()> {
        if self.state == SessionState::Removed {
            return Err(MapError::Engine(format!(
                "map session #{} has been torn down",
                self.generation
            )));
        }
        Ok(())
    }

    /// Puts the loaded data on the map.
    ///
    /// Sources go in first, one per dataset that loaded, then the campus
    /// layers in draw order, then the camera policy and the building widgets.
    /// Layers whose dataset failed are left out. An engine error partway
    /// leaves the session [`SessionState::Failed`].
    pub fn install(&mut self, data: CampusData) -> Result<LoadReport> {
        self.ensure_live()?;
        match self.state {
            SessionState::Installed => {
                return Err(MapError::Engine(format!(
                    "map session #{} already has its data",
                    self.generation
                )))
            }
            SessionState::Failed => {
                return Err(MapError::Engine(format!(
                    "map session #{} failed to install, enter the map again",
                    self.generation
                )))
            }
            _ => {}
        }

        let result = self.install_data(data);
        if let Err(err) = &result {
            self.state = SessionState::Failed;
            log::error!("map session #{} install failed: {}", self.generation, err);
        }
        result
    }

    fn install_data(&mut self, data: CampusData) -> Result<LoadReport> {
        let report = data.report();
        let mut available = Vec::new();
        for (dataset, outcome) in data.into_entries() {
            if let Ok(collection) = outcome {
                self.engine
                    .add_source(dataset.source_id(), &SourceSpec::geojson(collection))?;
                available.push(dataset.source_id());
            }
        }

        self.applied = campus_layers()?.apply(&mut self.engine, &available)?;
        ViewportController::new(&self.viewport).apply(&mut self.engine)?;

        self.widgets.attach(&mut self.engine)?;
        let zoom = self.engine.zoom();
        self.widgets.rescale(&mut self.engine, zoom)?;

        self.state = SessionState::Installed;
        log::info!(
            "map session #{} installed: {} sources, {} layers, {} skipped",
            self.generation,
            available.len(),
            self.applied.added.len(),
            self.applied.skipped.len()
        );
        Ok(report)
    }

    /// Zoom event: rescales the building markers
    pub fn handle_zoom(&mut self, zoom: f64) -> Result<f64> {
        self.ensure_live()?;
        self.widgets.rescale(&mut self.engine, zoom)
    }

    pub fn fly_to_building(&mut self, building: &str) -> Result<FlyToOptions> {
        self.ensure_live()?;
        self.widgets.fly_to(&mut self.engine, building)
    }

    /// Removes the engine instance; the session is unusable afterwards
    pub fn teardown(&mut self) -> Result<()> {
        self.ensure_live()?;
        self.state = SessionState::Removed;
        self.engine.remove()?;
        log::info!("map session #{} torn down", self.generation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{
            buildings::{Building, BuildingTable},
            fetcher::Dataset,
            geojson::FeatureCollection,
        },
        engine::headless::{EngineCommand, HeadlessEngine},
    };

    fn session() -> MapSession<HeadlessEngine> {
        let config = CampusConfig::default();
        let engine = HeadlessEngine::new(&config.map, &StyleDocument::base(&config.map));
        MapSession::new(engine, &config, 1)
    }

    fn all_loaded() -> CampusData {
        CampusData::loaded(
            FeatureCollection::empty(),
            FeatureCollection::empty(),
            FeatureCollection::empty(),
        )
    }

    #[test]
    fn test_sources_precede_layers() {
        let mut session = session();
        session.install(all_loaded()).unwrap();

        let commands = session.engine().commands();
        let last_source = commands
            .iter()
            .rposition(|c| matches!(c, EngineCommand::AddSource(_)))
            .unwrap();
        let first_layer = commands
            .iter()
            .position(|c| matches!(c, EngineCommand::AddLayer(_)))
            .unwrap();
        assert_eq!(last_source, 2);
        assert!(first_layer > last_source);
        assert_eq!(session.state(), SessionState::Installed);
    }

    #[test]
    fn test_initial_marker_scale_follows_fitted_zoom() {
        let mut session = session();
        session.install(all_loaded()).unwrap();

        let zoom = session.engine().zoom();
        assert!(zoom > 16.9 && zoom < 17.0);
        let scale = session.widgets().current_scale().unwrap();
        assert!(scale > 0.9 && scale < 1.0);
    }

    #[test]
    fn test_failed_dataset_skips_its_layers() {
        let mut session = session();
        let data = CampusData {
            points: Err(MapError::Source("HTTP 500".into())),
            ..all_loaded()
        };
        let report = session.install(data).unwrap();

        assert_eq!(report.failed(), vec![Dataset::Points]);
        assert_eq!(session.applied_layers().skipped, vec!["points", "point-labels"]);
        assert!(!session.engine().source_ids().contains(&"points".to_string()));
        assert_eq!(session.widgets().len(), 5);
    }

    #[test]
    fn test_install_twice_rejected() {
        let mut session = session();
        session.install(all_loaded()).unwrap();
        assert!(session.install(all_loaded()).is_err());
    }

    #[test]
    fn test_failed_install_blocks_retry() {
        let config = CampusConfig {
            buildings: BuildingTable::new(vec![Building::new("Nowhere", [200.0, 0.0])]),
            ..CampusConfig::default()
        };
        let engine = HeadlessEngine::new(&config.map, &StyleDocument::base(&config.map));
        let mut session = MapSession::new(engine, &config, 2);

        assert!(matches!(
            session.install(all_loaded()),
            Err(MapError::InvalidCoordinates(_))
        ));
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.engine().source_ids().len(), 3);

        let retry = session.install(all_loaded());
        assert!(matches!(retry, Err(MapError::Engine(msg)) if msg.contains("enter the map again")));
        assert_eq!(session.engine().source_ids().len(), 3);

        session.teardown().unwrap();
        assert_eq!(session.state(), SessionState::Removed);
    }

    #[test]
    fn test_teardown_removes_engine() {
        let mut session = session();
        let engine = session.engine().clone();
        session.teardown().unwrap();

        assert!(engine.is_removed());
        assert!(session.handle_zoom(17.0).is_err());
        assert!(session.teardown().is_err());
    }
}
