use crate::{data::geojson::FeatureCollection, layers::expression::Expr};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Background,
    Fill,
    Line,
    Symbol,
    Circle,
}

impl LayerType {
    /// Background layers draw without a source
    pub fn needs_source(&self) -> bool {
        !matches!(self, LayerType::Background)
    }
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Background => write!(f, "background"),
            LayerType::Fill => write!(f, "fill"),
            LayerType::Line => write!(f, "line"),
            LayerType::Symbol => write!(f, "symbol"),
            LayerType::Circle => write!(f, "circle"),
        }
    }
}

/// One style layer, serialized in the engine's layer format
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub paint: Map<String, Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub layout: Map<String, Value>,
    #[serde(rename = "minzoom", skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<f64>,
    /// Draw position; lower draws first
    #[serde(skip)]
    pub z_index: i32,
}

impl LayerSpec {
    pub fn new(id: impl Into<String>, layer_type: LayerType) -> Self {
        Self {
            id: id.into(),
            layer_type,
            source: None,
            filter: None,
            paint: Map::new(),
            layout: Map::new(),
            min_zoom: None,
            z_index: 0,
        }
    }

    pub fn background(id: impl Into<String>, color: &str) -> Self {
        Self::new(id, LayerType::Background).paint("background-color", color)
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn filter(mut self, filter: Expr) -> Self {
        self.filter = Some(filter.to_value());
        self
    }

    pub fn paint(mut self, property: &str, value: impl Into<Value>) -> Self {
        self.paint.insert(property.to_string(), value.into());
        self
    }

    pub fn layout(mut self, property: &str, value: impl Into<Value>) -> Self {
        self.layout.insert(property.to_string(), value.into());
        self
    }

    pub fn min_zoom(mut self, zoom: f64) -> Self {
        self.min_zoom = Some(zoom);
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// Data source registered with the engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SourceSpec {
    #[serde(rename = "geojson")]
    GeoJson { data: FeatureCollection },
}

impl SourceSpec {
    pub fn geojson(data: FeatureCollection) -> Self {
        SourceSpec::GeoJson { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::expression::{by_zoom, has};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_layer_serialization() {
        let layer = LayerSpec::new("buildings-fill", LayerType::Fill)
            .source("polygons")
            .filter(has("building"))
            .paint("fill-color", "#888888")
            .paint("fill-opacity", 0.6)
            .z_index(30);

        assert_eq!(
            serde_json::to_value(&layer).unwrap(),
            json!({
                "id": "buildings-fill",
                "type": "fill",
                "source": "polygons",
                "filter": ["has", "building"],
                "paint": { "fill-color": "#888888", "fill-opacity": 0.6 }
            })
        );
    }

    #[test]
    fn test_expression_paint_and_minzoom() {
        let layer = LayerSpec::new("roads", LayerType::Line)
            .source("lines")
            .paint("line-width", by_zoom(&[(15.0, 2.0), (19.0, 10.0)]))
            .layout("line-cap", "round")
            .min_zoom(14.0);
        let json = serde_json::to_value(&layer).unwrap();

        assert_eq!(json["paint"]["line-width"][0], "interpolate");
        assert_eq!(json["layout"]["line-cap"], "round");
        assert_eq!(json["minzoom"], 14.0);
    }

    #[test]
    fn test_background_has_no_source() {
        let layer = LayerSpec::background("background", "#f2efe9");
        assert!(!layer.layer_type.needs_source());
        assert_eq!(
            serde_json::to_value(&layer).unwrap(),
            json!({ "id": "background", "type": "background", "paint": { "background-color": "#f2efe9" } })
        );
    }

    #[test]
    fn test_geojson_source_serialization() {
        let source = SourceSpec::geojson(FeatureCollection::empty());
        assert_eq!(
            serde_json::to_value(&source).unwrap(),
            json!({ "type": "geojson", "data": { "type": "FeatureCollection", "features": [] } })
        );
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Fill.to_string(), "fill");
        assert_eq!(LayerType::Symbol.to_string(), "symbol");
    }
}
