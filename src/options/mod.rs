//! Centralized interaction options with TOML preset support.
//!
//! All tweakable settings (gesture thresholds, orbit/zoom tuning, picking,
//! popup placement and animation) are consolidated here. Options serialize
//! to/from TOML for presets.

mod camera;
mod gesture;
mod picking;
mod popup;

use std::path::Path;

pub use camera::CameraOptions;
pub use gesture::GestureOptions;
pub use picking::PickingOptions;
pub use popup::PopupOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PartviewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Tap-versus-drag thresholds.
    pub gesture: GestureOptions,
    /// Orbit and zoom parameters.
    pub camera: CameraOptions,
    /// Tap picking parameters.
    pub picking: PickingOptions,
    /// Popup placement and animation.
    pub popup: PopupOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PartviewError::Io`] if the file cannot be read and
    /// [`PartviewError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, PartviewError> {
        let content = std::fs::read_to_string(path).map_err(PartviewError::Io)?;
        toml::from_str(&content)
            .map_err(|e| PartviewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`PartviewError::OptionsParse`] if serialization fails and
    /// [`PartviewError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), PartviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PartviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PartviewError::Io)?;
        }
        std::fs::write(path, content).map_err(PartviewError::Io)
    }

    /// Copy with every section clamped into its valid range.
    ///
    /// Malformed values are replaced rather than rejected; each replacement
    /// is logged as a warning.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            gesture: self.gesture.sanitized(),
            camera: self.camera.sanitized(),
            picking: self.picking.sanitized(),
            popup: self.popup.sanitized(),
        }
    }
}

/// `value` if finite, otherwise `fallback`.
fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("non-finite option value, using {fallback}");
        fallback
    }
}

/// Clamp negatives to zero, warning with the option's name.
fn non_negative(name: &str, value: f32) -> f32 {
    if value < 0.0 {
        log::warn!("{name} is negative ({value}), using 0");
        0.0
    } else {
        value
    }
}

/// Swap a reversed `(min, max)` pair.
fn ordered_range(name: &str, min: f32, max: f32) -> (f32, f32) {
    if min > max {
        log::warn!("{name} range is reversed ({min} > {max}), swapping");
        (max, min)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn anchors_round_trip_through_toml() {
        let mut opts = Options::default();
        opts.popup.landscape_anchor = Some([1600.0, 540.0]);
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.popup.landscape_anchor, Some([1600.0, 540.0]));
        assert_eq!(parsed.popup.portrait_anchor, None);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[camera]
enable_roll = true
wheel_to_fov_speed = 10.0

[popup]
show_ease = "sine_out"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert!(opts.camera.enable_roll);
        assert_eq!(opts.camera.wheel_to_fov_speed, 10.0);
        assert_eq!(opts.popup.show_ease, EasingFunction::SineOut);
        // Everything else should be default
        assert_eq!(opts.camera.pinch_to_fov_speed, 0.08);
        assert_eq!(opts.gesture.tap_max_move_pixels, 12.0);
        assert_eq!(opts.popup.landscape_target_x, -1351.0);
    }

    #[test]
    fn sanitize_repairs_malformed_values() {
        let mut opts = Options::default();
        opts.camera.min_pitch = 70.0;
        opts.camera.max_pitch = -70.0;
        opts.camera.min_fov = f32::NAN;
        opts.gesture.tap_max_time = -1.0;
        opts.popup.fade_show_ratio = 4.0;
        opts.popup.canvas_scale = 0.0;

        let opts = opts.sanitized();
        assert_eq!(opts.camera.min_pitch, -70.0);
        assert_eq!(opts.camera.max_pitch, 70.0);
        assert_eq!(opts.camera.min_fov, 25.0);
        assert_eq!(opts.gesture.tap_max_time, 0.0);
        assert_eq!(opts.popup.fade_show_ratio, 1.0);
        assert_eq!(opts.popup.canvas_scale, 1.0);
    }

    #[test]
    fn sanitize_keeps_valid_values() {
        let opts = Options::default();
        assert_eq!(opts.clone().sanitized(), opts);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("gesture"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("picking"));
        assert!(props.contains_key("popup"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("rotate_speed").is_some());
        assert!(camera.get("min_pitch").is_none());
    }
}
