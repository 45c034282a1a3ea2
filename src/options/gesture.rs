use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{finite_or, non_negative};

/// Tap-versus-drag thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Gestures", inline)]
#[serde(default)]
pub struct GestureOptions {
    /// Maximum distance in pixels a pointer may travel from its press
    /// position and still count as a tap.
    #[schemars(title = "Tap Slop (px)", range(min = 0.0, max = 64.0), extend("step" = 1.0))]
    pub tap_max_move_pixels: f32,
    /// Maximum press duration in seconds for a tap.
    #[schemars(title = "Tap Time (s)", range(min = 0.05, max = 1.0), extend("step" = 0.01))]
    pub tap_max_time: f32,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            tap_max_move_pixels: 12.0,
            tap_max_time: 0.28,
        }
    }
}

impl GestureOptions {
    /// Replace non-finite or negative thresholds with usable values.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            tap_max_move_pixels: non_negative(
                "gesture.tap_max_move_pixels",
                finite_or(self.tap_max_move_pixels, defaults.tap_max_move_pixels),
            ),
            tap_max_time: non_negative(
                "gesture.tap_max_time",
                finite_or(self.tap_max_time, defaults.tap_max_time),
            ),
        }
    }
}
