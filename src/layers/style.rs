use crate::{
    core::{config::MapOptions, constants},
    layers::base::{LayerSpec, SourceSpec},
    MapError, Result,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Id of the layer every style starts with
pub const BACKGROUND_LAYER_ID: &str = "background";

/// A complete engine style document (style spec version 8)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDocument {
    pub version: u8,
    pub name: String,
    pub glyphs: String,
    pub center: [f64; 2],
    pub zoom: f64,
    pub sources: BTreeMap<String, SourceSpec>,
    pub layers: Vec<LayerSpec>,
}

impl StyleDocument {
    /// The style the engine is created with: no sources, only the background
    pub fn base(options: &MapOptions) -> Self {
        Self {
            version: 8,
            name: "campus".to_string(),
            glyphs: constants::GLYPHS_URL.to_string(),
            center: options.center,
            zoom: options.zoom,
            sources: BTreeMap::new(),
            layers: vec![LayerSpec::background(
                BACKGROUND_LAYER_ID,
                &options.background_color,
            )],
        }
    }

    pub fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    pub fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|l| l.id == id)
    }

    pub fn add_source(&mut self, id: &str, source: SourceSpec) -> Result<()> {
        if self.has_source(id) {
            return Err(MapError::Source(format!("source '{}' already exists", id)));
        }
        self.sources.insert(id.to_string(), source);
        Ok(())
    }

    /// Appends a layer on top of the existing ones
    pub fn add_layer(&mut self, layer: LayerSpec) -> Result<()> {
        if self.has_layer(&layer.id) {
            return Err(MapError::Layer(format!("layer '{}' already exists", layer.id)));
        }
        match (&layer.source, layer.layer_type.needs_source()) {
            (Some(source), true) if !self.has_source(source) => {
                return Err(MapError::Layer(format!(
                    "layer '{}' references missing source '{}'",
                    layer.id, source
                )));
            }
            (None, true) => {
                return Err(MapError::Layer(format!(
                    "{} layer '{}' needs a source",
                    layer.layer_type, layer.id
                )));
            }
            _ => {}
        }
        self.layers.push(layer);
        Ok(())
    }

    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
