use crate::core::config::MarkerScaleConfig;

/// Main interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two f64 values
    pub fn linear(start: f64, end: f64, t: f64) -> f64 {
        start * (1.0 - t) + end * t
    }

    /// Position of `value` within `[min, max]`, clamped to `[0, 1]`.
    ///
    /// A degenerate range is a step at `min`. NaN maps to 0.
    pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
        if value.is_nan() {
            return 0.0;
        }
        let span = max - min;
        if span <= 0.0 {
            return if value >= min { 1.0 } else { 0.0 };
        }
        ((value - min) / span).clamp(0.0, 1.0)
    }
}

/// Scale applied to building markers at `zoom`.
///
/// `min_scale + clamp((zoom - min_zoom) / (max_zoom - min_zoom), 0, 1) * (max_scale - min_scale)`,
/// kept within the two scale bounds whichever way round they are given.
pub fn marker_scale(zoom: f64, config: &MarkerScaleConfig) -> f64 {
    let t = Interpolation::normalize(zoom, config.min_zoom, config.max_zoom);
    let low = config.min_scale.min(config.max_scale);
    let high = config.min_scale.max(config.max_scale);
    Interpolation::linear(config.min_scale, config.max_scale, t)
        .max(low)
        .min(high)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> MarkerScaleConfig {
        MarkerScaleConfig::default()
    }

    #[test]
    fn test_scale_endpoints() {
        let config = defaults();
        assert!((marker_scale(15.0, &config) - 0.6).abs() < 1e-12);
        assert!((marker_scale(19.0, &config) - 1.4).abs() < 1e-12);
        assert!((marker_scale(17.0, &config) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_clamped_outside_range() {
        let config = defaults();
        assert_eq!(marker_scale(3.0, &config), 0.6);
        assert_eq!(marker_scale(22.0, &config), 1.4);
        assert_eq!(marker_scale(f64::NAN, &config), 0.6);
    }

    #[test]
    fn test_scale_monotonic_in_zoom() {
        let config = defaults();
        let mut previous = f64::NEG_INFINITY;
        for step in 0..=240 {
            let zoom = step as f64 * 0.1;
            let scale = marker_scale(zoom, &config);
            assert!(scale >= previous, "scale dropped at zoom {}", zoom);
            assert!((0.6..=1.4).contains(&scale));
            previous = scale;
        }
    }

    #[test]
    fn test_inverted_scale_range_does_not_panic() {
        let config = MarkerScaleConfig {
            min_scale: 1.4,
            max_scale: 0.6,
            ..defaults()
        };
        assert!((marker_scale(15.0, &config) - 1.4).abs() < 1e-12);
        assert!((marker_scale(19.0, &config) - 0.6).abs() < 1e-12);
        assert!((marker_scale(30.0, &config) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_nan_scale_bound_does_not_panic() {
        let config = MarkerScaleConfig {
            max_scale: f64::NAN,
            ..defaults()
        };
        assert_eq!(marker_scale(15.0, &config), 0.6);
    }

    #[test]
    fn test_degenerate_range_is_a_step() {
        let config = MarkerScaleConfig {
            min_zoom: 17.0,
            max_zoom: 17.0,
            ..defaults()
        };
        assert_eq!(marker_scale(16.9, &config), 0.6);
        assert_eq!(marker_scale(17.0, &config), 1.4);
    }
}
