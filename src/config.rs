//! Tuning policy for the map viewport.
//!
//! Every value here is policy rather than contract; the defaults are what the
//! origins page ships with. Overrides can be stored as partial JSON under
//! [`CONFIG_STORAGE_KEY`] in `localStorage`.

use serde::Deserialize;

use crate::error::MapError;

pub const CONFIG_STORAGE_KEY: &str = "om_map_config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub initial_scale: f64,
    /// Scale change applied by the +/- buttons.
    pub zoom_step: f64,
    /// Scale change per unit of wheel `deltaY` (sign inverted).
    pub wheel_sensitivity: f64,
    /// Content layer size as a multiple of the container.
    pub content_multiple: f64,
    /// Multiplier applied to the release speed before it seeds the drift.
    pub release_damping: f64,
    /// Per-frame velocity multiplier; 1.0 keeps the drift constant.
    pub friction: f64,
    /// Below this speed (px/frame) a decaying drift stops.
    pub rest_speed: f64,
    pub idle_drift_x: f64,
    pub idle_drift_y: f64,
    /// Trailing window used to measure release velocity.
    pub velocity_window_ms: f64,
    pub frame_ms: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 2.0,
            initial_scale: 1.0,
            zoom_step: 0.1,
            wheel_sensitivity: 0.005,
            content_multiple: 2.0,
            release_damping: 0.15,
            friction: 1.0,
            rest_speed: 0.01,
            idle_drift_x: -0.12,
            idle_drift_y: -0.06,
            velocity_window_ms: 100.0,
            frame_ms: 1000.0 / 60.0,
        }
    }
}

impl MapConfig {
    pub fn from_json(raw: &str) -> Result<Self, MapError> {
        let cfg: MapConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), MapError> {
        let values = [
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("initial_scale", self.initial_scale),
            ("zoom_step", self.zoom_step),
            ("wheel_sensitivity", self.wheel_sensitivity),
            ("content_multiple", self.content_multiple),
            ("release_damping", self.release_damping),
            ("friction", self.friction),
            ("rest_speed", self.rest_speed),
            ("idle_drift_x", self.idle_drift_x),
            ("idle_drift_y", self.idle_drift_y),
            ("velocity_window_ms", self.velocity_window_ms),
            ("frame_ms", self.frame_ms),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MapError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.min_scale <= 0.0 || self.min_scale >= self.max_scale {
            return Err(MapError::InvalidConfig(format!(
                "scale range [{}, {}] is empty",
                self.min_scale, self.max_scale
            )));
        }
        if !(self.min_scale..=self.max_scale).contains(&self.initial_scale) {
            return Err(MapError::InvalidConfig(format!(
                "initial_scale {} lies outside [{}, {}]",
                self.initial_scale, self.min_scale, self.max_scale
            )));
        }
        let tuning = [
            ("zoom_step", self.zoom_step),
            ("wheel_sensitivity", self.wheel_sensitivity),
            ("release_damping", self.release_damping),
            ("rest_speed", self.rest_speed),
        ];
        if let Some((name, _)) = tuning.iter().find(|(_, v)| *v < 0.0) {
            return Err(MapError::InvalidConfig(format!("{name} must not be negative")));
        }
        if self.content_multiple < 1.0 {
            return Err(MapError::InvalidConfig(
                "content_multiple must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(MapError::InvalidConfig("friction must be within [0, 1]".into()));
        }
        if self.velocity_window_ms <= 0.0 || self.frame_ms <= 0.0 {
            return Err(MapError::InvalidConfig(
                "velocity_window_ms and frame_ms must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Starting scale, held inside the zoom range even for unvalidated configs.
    pub fn start_scale(&self) -> f64 {
        self.initial_scale.max(self.min_scale).min(self.max_scale)
    }

    /// Reads overrides from local storage, falling back to defaults.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(CONFIG_STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => match Self::from_json(&raw) {
                Ok(cfg) => {
                    log::info!("map config loaded from {CONFIG_STORAGE_KEY}");
                    cfg
                }
                Err(err) => {
                    log::warn!("ignoring stored map config: {err}");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(MapConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = MapConfig::from_json(r#"{ "max_scale": 3.0, "friction": 0.9 }"#).unwrap();
        assert_eq!(cfg.max_scale, 3.0);
        assert_eq!(cfg.friction, 0.9);
        assert_eq!(cfg.min_scale, 0.5);
        assert_eq!(cfg.content_multiple, 2.0);
    }

    #[test]
    fn inverted_scale_range_is_rejected() {
        let err = MapConfig::from_json(r#"{ "min_scale": 2.0, "max_scale": 1.0 }"#).unwrap_err();
        assert!(matches!(err, MapError::InvalidConfig(_)));
    }

    #[test]
    fn friction_above_one_is_rejected() {
        let cfg = MapConfig {
            friction: 1.5,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn initial_scale_outside_range_is_rejected() {
        for raw in [r#"{ "initial_scale": 5.0 }"#, r#"{ "initial_scale": 0.25 }"#] {
            let err = MapConfig::from_json(raw).unwrap_err();
            assert!(matches!(err, MapError::InvalidConfig(_)));
        }
        // the bounds themselves are fine
        assert!(MapConfig::from_json(r#"{ "initial_scale": 2.0 }"#).is_ok());
    }

    #[test]
    fn negative_tuning_values_are_rejected() {
        for field in ["zoom_step", "wheel_sensitivity", "release_damping", "rest_speed"] {
            let raw = format!(r#"{{ "{field}": -0.005 }}"#);
            let err = MapConfig::from_json(&raw).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
        assert!(MapConfig::from_json(r#"{ "release_damping": 0.0 }"#).is_ok());
    }

    #[test]
    fn malformed_json_surfaces_parse_error() {
        let err = MapConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, MapError::ConfigJson(_)));
    }
}
