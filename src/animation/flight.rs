use crate::core::{config::FlyToConfig, geo::LatLng};
use serde::{Serialize, Serializer};

/// Camera flight handed to the engine's `flyTo`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyToOptions {
    pub center: LatLng,
    pub zoom: f64,
    pub speed: f64,
    pub curve: f64,
    pub essential: bool,
}

impl FlyToOptions {
    /// A flight to `center` with the configured zoom and pacing
    pub fn to(center: LatLng, config: &FlyToConfig) -> Self {
        Self {
            center,
            zoom: config.zoom,
            speed: config.speed,
            curve: config.curve,
            essential: config.essential,
        }
    }
}

/// Serializes to the engine's camera options object with `center` as `[lng, lat]`
impl Serialize for FlyToOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("FlyToOptions", 5)?;
        state.serialize_field("center", &self.center.to_lng_lat())?;
        state.serialize_field("zoom", &self.zoom)?;
        state.serialize_field("speed", &self.speed)?;
        state.serialize_field("curve", &self.curve)?;
        state.serialize_field("essential", &self.essential)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_engine_order() {
        let options = FlyToOptions::to(LatLng::new(28.5964, -81.3014), &FlyToConfig::default());
        let json = serde_json::to_value(options).unwrap();

        assert_eq!(json["center"], serde_json::json!([-81.3014, 28.5964]));
        assert_eq!(json["zoom"], 18.0);
        assert_eq!(json["essential"], true);
    }
}
