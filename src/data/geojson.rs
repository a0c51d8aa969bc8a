use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A GeoJSON FeatureCollection held as an opaque payload.
///
/// Only the envelope is checked (`type` and a `features` array); geometry and
/// properties are left for the engine to interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct FeatureCollection {
    raw: Value,
}

impl FeatureCollection {
    /// Wraps a parsed JSON value, checking the envelope
    pub fn from_value(raw: Value) -> Result<Self> {
        let kind = raw.get("type").and_then(Value::as_str);
        if kind != Some("FeatureCollection") {
            return Err(MapError::InvalidGeoJson(format!(
                "expected a FeatureCollection, found type {:?}",
                kind.unwrap_or("<missing>")
            )));
        }
        if !raw.get("features").is_some_and(Value::is_array) {
            return Err(MapError::InvalidGeoJson(
                "FeatureCollection has no features array".into(),
            ));
        }
        Ok(Self { raw })
    }

    /// Parses a GeoJSON document from a string
    pub fn from_str(geojson_str: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(geojson_str)?;
        Self::from_value(raw)
    }

    /// An empty collection
    pub fn empty() -> Self {
        Self {
            raw: serde_json::json!({ "type": "FeatureCollection", "features": [] }),
        }
    }

    pub fn feature_count(&self) -> usize {
        self.features().len()
    }

    pub fn features(&self) -> &[Value] {
        self.raw
            .get("features")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn into_value(self) -> Value {
        self.raw
    }
}

impl TryFrom<Value> for FeatureCollection {
    type Error = MapError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<FeatureCollection> for Value {
    fn from(collection: FeatureCollection) -> Self {
        collection.raw
    }
}
