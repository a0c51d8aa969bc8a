//! Prelude module for common campusmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use campusmap::prelude::*;`

pub use crate::core::{
    config::{
        CampusConfig, DataEndpoints, FlyToConfig, MapOptions, MarkerScaleConfig, ViewportConfig,
    },
    geo::{LatLng, LatLngBounds, Point},
    map::{MapSession, SessionState},
    viewport::{Viewport, ViewportController},
};

pub use crate::layers::{
    base::{LayerSpec, LayerType, SourceSpec},
    expression::Expr,
    manager::LayerManager,
    style::StyleDocument,
};

pub use crate::data::{
    buildings::{Building, BuildingTable},
    fetcher::{
        load_campus_data, CampusData, Dataset, GeoJsonFetcher, HttpFetcher, LoadReport,
        StaticFetcher,
    },
    geojson::FeatureCollection,
};

#[cfg(all(feature = "tokio-runtime", not(target_arch = "wasm32")))]
pub use crate::data::fetcher::FileFetcher;

pub use crate::animation::{marker_scale, FlyToOptions};

pub use crate::engine::{
    headless::{HeadlessEngine, HeadlessFactory},
    EngineFactory, MapEngine, MarkerId, MarkerSpec,
};

pub use crate::ui::{
    dom::{DomSurface, HeadlessDom},
    glossary::GlossarySidebar,
    navigation::PanelMenu,
    screen::{Screen, ScreenController},
    widget::BuildingWidgets,
};

pub use crate::app::{CampusApp, LoadTicket};

pub use crate::{Error as MapError, Result};

pub use fxhash::FxHashMap as HashMap;
