//! Browser entry point.
//!
//! `boot` builds the [`CampusApp`] over Mapbox GL and the live page, parks it
//! in a thread-local and wires the page's buttons to it. Event callbacks that
//! find the app already borrowed skip the event.

pub mod dom;
pub mod logger;
pub mod mapbox;

use crate::{
    app::{CampusApp, LoadTicket},
    core::config::CampusConfig,
    data::fetcher::{load_campus_data, HttpFetcher},
    engine::MapEngine,
    ui::{ids, navigation::PanelMenu},
    MapError, Result,
};
use dom::WebDom;
use mapbox::MapboxFactory;
use std::cell::RefCell;
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};

type WebApp = CampusApp<MapboxFactory, WebDom>;

thread_local! {
    static APP: RefCell<Option<WebApp>> = RefCell::new(None);
}

fn to_js(err: MapError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Runs `f` on the app unless it is missing or busy
fn with_app<R>(f: impl FnOnce(&mut WebApp) -> R) -> Option<R> {
    APP.with(|cell| {
        let Ok(mut app) = cell.try_borrow_mut() else {
            log::debug!("app is busy, skipping event");
            return None;
        };
        app.as_mut().map(f)
    })
}

fn report(context: &str, result: Option<Result<impl Sized>>) {
    if let Some(Err(err)) = result {
        log::error!("{}: {}", context, err);
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Initializes the page. `config_json` overrides the built-in configuration.
#[wasm_bindgen]
pub fn boot(config_json: Option<String>) -> std::result::Result<(), JsValue> {
    let config = match config_json {
        Some(json) => CampusConfig::from_json_str(&json).map_err(to_js)?,
        None => {
            let config = CampusConfig::default();
            config.validate().map_err(to_js)?;
            config
        }
    };

    let dom = WebDom::new().map_err(to_js)?;
    let sections: Vec<String> = dom
        .query_all(&format!(".{}", ids::PANEL_CLASS))
        .map_err(to_js)?
        .iter()
        .map(Element::id)
        .filter(|id| !id.is_empty() && id != ids::MENU_PANEL)
        .collect();

    let factory = MapboxFactory::new(|building| {
        report("building widget", with_app(|app| app.select_building(&building)));
    });
    let mut app =
        CampusApp::new(config, factory, dom).with_panels(PanelMenu::new(ids::MENU_PANEL, sections));
    app.render().map_err(to_js)?;
    wire_listeners(app.dom()).map_err(to_js)?;

    APP.with(|cell| *cell.borrow_mut() = Some(app));
    log::info!("campus map ready");
    Ok(())
}

/// Attaches a page-lifetime listener
fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| MapError::Dom(format!("{:?}", e)))?;
    closure.forget();
    Ok(())
}

fn by_id(dom: &WebDom, id: &str) -> Result<Element> {
    dom.document()
        .get_element_by_id(id)
        .ok_or_else(|| MapError::Dom(format!("no element with id '{}'", id)))
}

fn wire_listeners(dom: &WebDom) -> Result<()> {
    listen(&by_id(dom, ids::ENTER_BUTTON)?, "click", |_| enter())?;
    listen(&by_id(dom, ids::GLOSSARY_TOGGLE)?, "click", |_| {
        report("glossary", with_app(|app| app.toggle_glossary()));
    })?;

    for button in dom.query_all(&format!(".{}", ids::SECTION_BUTTON_CLASS))? {
        let Some(panel) = button.get_attribute("data-panel") else {
            log::warn!("section button without data-panel");
            continue;
        };
        listen(&button, "click", move |_| {
            report("panel", with_app(|app| app.show_panel(&panel)));
        })?;
    }

    for button in dom.query_all(&format!(".{}", ids::BACK_BUTTON_CLASS))? {
        listen(&button, "click", |_| {
            report("panel", with_app(|app| app.back_to_menu()));
        })?;
    }

    for button in dom.query_all(&format!(".{}", ids::BUILDING_BUTTON_CLASS))? {
        let Some(building) = button.get_attribute("data-building") else {
            log::warn!("building button without data-building");
            continue;
        };
        listen(&button, "click", move |_| {
            report("building button", with_app(|app| app.select_building(&building)));
        })?;
    }
    Ok(())
}

/// Entry button: new session, data load on the engine's `load` event
fn enter() {
    report(
        "map init",
        with_app(|app| -> Result<()> {
            let ticket = app.enter()?;
            if let Some(session) = app.session_mut() {
                let engine = session.engine_mut();
                engine.on("load", move |_| load(ticket.clone()));
                engine.on("zoom", |_| zoom_changed());
            }
            Ok(())
        }),
    );
}

fn zoom_changed() {
    report(
        "zoom",
        with_app(|app| {
            let zoom = app.session().map(|s| s.engine().zoom());
            match zoom {
                Some(zoom) => app.handle_zoom(zoom),
                None => Ok(None),
            }
        }),
    );
}

fn origin_fetcher() -> Result<HttpFetcher> {
    let origin = web_sys::window()
        .ok_or_else(|| MapError::Dom("no window available".into()))?
        .location()
        .origin()
        .map_err(|e| MapError::Dom(format!("{:?}", e)))?;
    HttpFetcher::new(&origin)
}

fn load(ticket: LoadTicket) {
    spawn_local(async move {
        let fetcher = match origin_fetcher() {
            Ok(fetcher) => fetcher,
            Err(err) => {
                log::error!("cannot fetch map data: {}", err);
                return;
            }
        };
        let data = load_campus_data(&fetcher, &ticket.endpoints).await;
        match with_app(|app| app.complete_load(&ticket, data)) {
            Some(Ok(_)) => {}
            Some(Err(err)) => log::error!("map data install: {}", err),
            None => log::warn!("map data for session #{} arrived while busy", ticket.generation),
        }
    });
}
