//! [`MapEngine`] over Mapbox GL JS, loaded on the page as `mapboxgl`.

use crate::{
    animation::FlyToOptions,
    core::{
        config::MapOptions,
        geo::{LatLng, LatLngBounds},
    },
    engine::{EngineFactory, MapEngine, MarkerId, MarkerSpec},
    layers::{
        base::{LayerSpec, SourceSpec},
        style::StyleDocument,
    },
    MapError, Result,
};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Map)]
    pub type MapboxMap;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Map", catch)]
    fn new(options: &JsValue) -> std::result::Result<MapboxMap, JsValue>;

    #[wasm_bindgen(method, js_name = addSource, catch)]
    fn add_source(this: &MapboxMap, id: &str, source: &JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = addLayer, catch)]
    fn add_layer(this: &MapboxMap, layer: &JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = fitBounds)]
    fn fit_bounds(this: &MapboxMap, bounds: &JsValue, options: &JsValue);

    #[wasm_bindgen(method, js_name = setMaxBounds)]
    fn set_max_bounds(this: &MapboxMap, bounds: &JsValue);

    #[wasm_bindgen(method, js_name = setMinZoom, catch)]
    fn set_min_zoom(this: &MapboxMap, zoom: f64) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = setMaxZoom, catch)]
    fn set_max_zoom(this: &MapboxMap, zoom: f64) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = flyTo)]
    fn fly_to(this: &MapboxMap, options: &JsValue);

    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &MapboxMap) -> f64;

    #[wasm_bindgen(method, js_name = getCenter)]
    fn get_center(this: &MapboxMap) -> JsValue;

    #[wasm_bindgen(method)]
    fn on(this: &MapboxMap, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn remove(this: &MapboxMap);

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Marker)]
    pub type MapboxMarker;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Marker")]
    fn new(options: &JsValue) -> MapboxMarker;

    #[wasm_bindgen(method, js_name = setLngLat)]
    fn set_lng_lat(this: &MapboxMarker, lng_lat: &JsValue) -> MapboxMarker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &MapboxMarker, map: &MapboxMap) -> MapboxMarker;

    #[wasm_bindgen(method, js_name = remove)]
    fn remove_marker(this: &MapboxMarker);
}

fn js_error(context: &str, err: JsValue) -> MapError {
    MapError::Engine(format!("{}: {:?}", context, err))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| MapError::Engine(format!("failed to convert to JS: {}", e)))
}

fn set_property(target: &JsValue, key: &str, value: &JsValue) -> Result<()> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| js_error(key, e))
}

/// Called with the building name when a marker is clicked
pub type MarkerClickHandler = Rc<dyn Fn(String)>;

struct PlacedMarker {
    marker: MapboxMarker,
    /// Child of the marker element; scaling it leaves the anchor alone
    inner: HtmlElement,
    _on_click: Closure<dyn FnMut(web_sys::Event)>,
}

pub struct MapboxEngine {
    map: MapboxMap,
    markers: Vec<PlacedMarker>,
    listeners: Vec<Closure<dyn FnMut(JsValue)>>,
    on_marker_click: MarkerClickHandler,
    removed: bool,
}

impl MapboxEngine {
    pub fn new(
        options: &MapOptions,
        style: &StyleDocument,
        on_marker_click: MarkerClickHandler,
    ) -> Result<Self> {
        if let Some(token) = &options.access_token {
            let namespace = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl"))
                .map_err(|e| js_error("mapboxgl", e))?;
            set_property(&namespace, "accessToken", &JsValue::from_str(token))?;
        }

        let map_options = serde_json::json!({
            "container": options.container,
            "style": style.to_json()?,
            "center": options.center,
            "zoom": options.zoom,
        });
        let map = MapboxMap::new(&to_js(&map_options)?).map_err(|e| js_error("new Map", e))?;
        log::debug!("mapbox map created in #{}", options.container);

        Ok(Self {
            map,
            markers: Vec::new(),
            listeners: Vec::new(),
            on_marker_click,
            removed: false,
        })
    }

    /// Subscribes to a map event for the lifetime of this instance
    pub fn on(&mut self, event: &str, handler: impl FnMut(JsValue) + 'static) {
        let closure = Closure::<dyn FnMut(JsValue)>::new(handler);
        self.map.on(event, closure.as_ref().unchecked_ref());
        self.listeners.push(closure);
    }

    fn live(&self) -> Result<&MapboxMap> {
        if self.removed {
            return Err(MapError::Engine("map instance has been removed".into()));
        }
        Ok(&self.map)
    }

    fn marker_element(&self, marker: &MarkerSpec) -> Result<(HtmlElement, HtmlElement)> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| MapError::Dom("no document available".into()))?;
        let create = |class: &str| -> Result<HtmlElement> {
            let element = document
                .create_element("div")
                .map_err(|e| js_error("createElement", e))?
                .dyn_into::<HtmlElement>()
                .map_err(|_| MapError::Dom("div is not an HTML element".into()))?;
            element.set_class_name(class);
            Ok(element)
        };

        let outer = create(&marker.class_name)?;
        let inner = create(&format!("{}__inner", marker.class_name))?;
        inner.set_text_content(Some(&marker.label));
        outer.set_title(&marker.building);
        outer
            .append_child(&inner)
            .map_err(|e| js_error("appendChild", e))?;
        Ok((outer, inner))
    }
}

impl MapEngine for MapboxEngine {
    fn add_source(&mut self, id: &str, source: &SourceSpec) -> Result<()> {
        let source = to_js(source)?;
        self.live()?
            .add_source(id, &source)
            .map_err(|e| js_error("addSource", e))
    }

    fn add_layer(&mut self, layer: &LayerSpec) -> Result<()> {
        let layer_js = to_js(layer)?;
        self.live()?
            .add_layer(&layer_js)
            .map_err(|e| js_error(&format!("addLayer {}", layer.id), e))
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64) -> Result<()> {
        let bounds = to_js(&bounds.to_lng_lat_pairs())?;
        let options = to_js(&serde_json::json!({ "padding": padding }))?;
        self.live()?.fit_bounds(&bounds, &options);
        Ok(())
    }

    fn set_max_bounds(&mut self, bounds: &LatLngBounds) -> Result<()> {
        let bounds = to_js(&bounds.to_lng_lat_pairs())?;
        self.live()?.set_max_bounds(&bounds);
        Ok(())
    }

    fn set_min_zoom(&mut self, zoom: f64) -> Result<()> {
        self.live()?
            .set_min_zoom(zoom)
            .map_err(|e| js_error("setMinZoom", e))
    }

    fn set_max_zoom(&mut self, zoom: f64) -> Result<()> {
        self.live()?
            .set_max_zoom(zoom)
            .map_err(|e| js_error("setMaxZoom", e))
    }

    fn fly_to(&mut self, options: &FlyToOptions) -> Result<()> {
        let options = to_js(options)?;
        self.live()?.fly_to(&options);
        Ok(())
    }

    fn add_marker(&mut self, marker: &MarkerSpec) -> Result<MarkerId> {
        let position = to_js(&marker.position.validated()?.to_lng_lat())?;
        let (outer, inner) = self.marker_element(marker)?;

        let handler = self.on_marker_click.clone();
        let building = marker.building.clone();
        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            event.stop_propagation();
            handler(building.clone());
        });
        outer
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(|e| js_error("addEventListener", e))?;

        let options = js_sys::Object::new();
        set_property(&options, "element", &outer)?;
        set_property(&options, "anchor", &JsValue::from_str("center"))?;

        let created = MapboxMarker::new(&options);
        created.set_lng_lat(&position);
        created.add_to(self.live()?);

        let id = MarkerId(self.markers.len());
        self.markers.push(PlacedMarker {
            marker: created,
            inner,
            _on_click: on_click,
        });
        Ok(id)
    }

    fn set_marker_scale(&mut self, marker: MarkerId, scale: f64) -> Result<()> {
        self.live()?;
        let placed = self
            .markers
            .get(marker.0)
            .ok_or_else(|| MapError::Engine(format!("unknown marker {:?}", marker)))?;
        placed
            .inner
            .style()
            .set_property("transform", &format!("scale({})", scale))
            .map_err(|e| js_error("style.transform", e))
    }

    fn zoom(&self) -> f64 {
        self.map.get_zoom()
    }

    fn center(&self) -> LatLng {
        let center = self.map.get_center();
        let coordinate = |key: &str| {
            js_sys::Reflect::get(&center, &JsValue::from_str(key))
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(f64::NAN)
        };
        LatLng::new(coordinate("lat"), coordinate("lng"))
    }

    fn remove(&mut self) -> Result<()> {
        self.live()?;
        for placed in self.markers.drain(..) {
            placed.marker.remove_marker();
        }
        self.map.remove();
        self.listeners.clear();
        self.removed = true;
        Ok(())
    }
}

/// Creates [`MapboxEngine`]s that report marker clicks to one handler
pub struct MapboxFactory {
    on_marker_click: MarkerClickHandler,
}

impl MapboxFactory {
    pub fn new(on_marker_click: impl Fn(String) + 'static) -> Self {
        Self {
            on_marker_click: Rc::new(on_marker_click),
        }
    }
}

impl EngineFactory for MapboxFactory {
    type Engine = MapboxEngine;

    fn create(&mut self, options: &MapOptions, style: &StyleDocument) -> Result<MapboxEngine> {
        MapboxEngine::new(options, style, self.on_marker_click.clone())
    }
}
