//! Application state: the screens, the glossary, the panel menu and the
//! current map session, owned in one place.

use crate::{
    animation::FlyToOptions,
    core::{
        config::{CampusConfig, DataEndpoints},
        map::MapSession,
    },
    data::fetcher::{load_campus_data, CampusData, GeoJsonFetcher, LoadReport},
    engine::EngineFactory,
    ui::{
        dom::DomSurface,
        glossary::GlossarySidebar,
        ids,
        navigation::PanelMenu,
        screen::{Screen, ScreenController},
    },
    MapError, Result,
};

/// Issued by [`CampusApp::enter`]; the data load started for that session
/// must hand it back to [`CampusApp::complete_load`]
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    pub generation: u64,
    pub endpoints: DataEndpoints,
}

pub struct CampusApp<F: EngineFactory, D: DomSurface> {
    config: CampusConfig,
    factory: F,
    dom: D,
    screens: ScreenController,
    glossary: GlossarySidebar,
    panels: PanelMenu,
    session: Option<MapSession<F::Engine>>,
    generation: u64,
    report: Option<LoadReport>,
}

impl<F: EngineFactory, D: DomSurface> CampusApp<F, D> {
    pub fn new(config: CampusConfig, factory: F, dom: D) -> Self {
        Self {
            config,
            factory,
            dom,
            screens: ScreenController::new(),
            glossary: GlossarySidebar::new(),
            panels: PanelMenu::new(ids::MENU_PANEL, Vec::<String>::new()),
            session: None,
            generation: 0,
            report: None,
        }
    }

    pub fn with_panels(mut self, panels: PanelMenu) -> Self {
        self.panels = panels;
        self
    }

    /// Draws the initial chrome: landing screen up, glossary closed
    pub fn render(&mut self) -> Result<()> {
        self.screens.show(&mut self.dom, Screen::Landing)?;
        self.glossary.render(&mut self.dom)
    }

    /// Entry button: shows the map screen and starts a fresh map session.
    ///
    /// A previous session is torn down before the new engine is created.
    pub fn enter(&mut self) -> Result<LoadTicket> {
        self.screens.show(&mut self.dom, Screen::Map)?;

        if let Some(mut previous) = self.session.take() {
            if let Err(err) = previous.teardown() {
                log::warn!(
                    "failed to tear down map session #{}: {}",
                    previous.generation(),
                    err
                );
            }
        }
        self.report = None;
        self.dom.set_visible(ids::MAP_STATUS, false)?;

        self.generation += 1;
        let session = MapSession::create(&mut self.factory, &self.config, self.generation)?;
        self.session = Some(session);

        Ok(LoadTicket {
            generation: self.generation,
            endpoints: self.config.data.clone(),
        })
    }

    /// Installs `data` into the session `ticket` was issued for.
    ///
    /// Returns `None` when that session is gone; the data is dropped.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        data: CampusData,
    ) -> Result<Option<LoadReport>> {
        let Some(session) = self
            .session
            .as_mut()
            .filter(|s| s.generation() == ticket.generation)
        else {
            log::warn!(
                "dropping data loaded for stale map session #{} (current #{})",
                ticket.generation,
                self.generation
            );
            return Ok(None);
        };

        let report = session.install(data)?;
        match report.status_message() {
            Some(message) => {
                self.dom.set_text(ids::MAP_STATUS, &message)?;
                self.dom.set_visible(ids::MAP_STATUS, true)?;
            }
            None => self.dom.set_visible(ids::MAP_STATUS, false)?,
        }
        self.report = Some(report.clone());
        Ok(Some(report))
    }

    /// [`CampusApp::enter`] followed by the joined fetch and the install
    pub async fn enter_and_load<G>(&mut self, fetcher: &G) -> Result<Option<LoadReport>>
    where
        G: GeoJsonFetcher + ?Sized,
    {
        let ticket = self.enter()?;
        let data = load_campus_data(fetcher, &ticket.endpoints).await;
        self.complete_load(&ticket, data)
    }

    /// Zoom event; `None` until a session exists
    pub fn handle_zoom(&mut self, zoom: f64) -> Result<Option<f64>> {
        match self.session.as_mut() {
            Some(session) => session.handle_zoom(zoom).map(Some),
            None => Ok(None),
        }
    }

    /// Building button or widget click
    pub fn select_building(&mut self, building: &str) -> Result<FlyToOptions> {
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| MapError::Engine("the map has not been initialized".into()))?;
        session.fly_to_building(building)
    }

    pub fn toggle_glossary(&mut self) -> Result<bool> {
        self.glossary.toggle(&mut self.dom)
    }

    pub fn show_panel(&mut self, panel: &str) -> Result<()> {
        self.panels.show(&mut self.dom, panel)
    }

    pub fn back_to_menu(&mut self) -> Result<()> {
        self.panels.back(&mut self.dom)
    }

    /// Outcome of the current session's data load
    pub fn load_report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }

    pub fn session(&self) -> Option<&MapSession<F::Engine>> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut MapSession<F::Engine>> {
        self.session.as_mut()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn screen(&self) -> Screen {
        self.screens.current()
    }

    pub fn glossary(&self) -> &GlossarySidebar {
        &self.glossary
    }

    pub fn panels(&self) -> &PanelMenu {
        &self.panels
    }

    pub fn config(&self) -> &CampusConfig {
        &self.config
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::geojson::FeatureCollection,
        engine::headless::{HeadlessFactory, Lifecycle},
        ui::dom::HeadlessDom,
    };

    fn app() -> CampusApp<HeadlessFactory, HeadlessDom> {
        let dom = HeadlessDom::with_elements(ids::ALL);
        CampusApp::new(CampusConfig::default(), HeadlessFactory::new(), dom)
    }

    fn data() -> CampusData {
        CampusData::loaded(
            FeatureCollection::empty(),
            FeatureCollection::empty(),
            FeatureCollection::empty(),
        )
    }

    #[test]
    fn test_render_shows_landing() {
        let mut app = app();
        app.render().unwrap();
        assert_eq!(app.screen(), Screen::Landing);
        assert_eq!(app.dom().is_visible(ids::LANDING), Some(true));
        assert_eq!(app.dom().text(ids::GLOSSARY_TOGGLE), Some("▶"));
    }

    #[test]
    fn test_enter_creates_one_session() {
        let mut app = app();
        let ticket = app.enter().unwrap();

        assert_eq!(ticket.generation, 1);
        assert_eq!(app.screen(), Screen::Map);
        assert_eq!(app.factory().lifecycle(), vec![Lifecycle::Created(0)]);
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let mut app = app();
        let stale = app.enter().unwrap();
        let current = app.enter().unwrap();

        assert_eq!(app.complete_load(&stale, data()).unwrap(), None);
        assert!(app.load_report().is_none());
        assert!(app.complete_load(&current, data()).unwrap().is_some());
    }

    #[test]
    fn test_select_building_before_entry() {
        let mut app = app();
        assert!(matches!(
            app.select_building("Building 1"),
            Err(MapError::Engine(_))
        ));
        assert_eq!(app.handle_zoom(17.0).unwrap(), None);
    }
}
