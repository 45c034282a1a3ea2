use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{finite_or, non_negative};

/// Ray-test parameters for tap picking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Picking", inline)]
#[serde(default)]
pub struct PickingOptions {
    /// Longest ray distance that can produce a hit.
    #[schemars(title = "Max Distance", range(min = 1.0, max = 500.0), extend("step" = 1.0))]
    pub max_distance: f32,
    /// Bit mask of scene layers a tap can hit.
    #[schemars(skip)]
    pub interaction_mask: u32,
    /// Distance from the camera to the orbit pivot along the view axis.
    #[schemars(skip)]
    pub camera_distance: f32,
    /// Ignore taps entirely while the popup is open.
    #[schemars(title = "Lock Picking While Open")]
    pub disable_when_popup_open: bool,
}

impl Default for PickingOptions {
    fn default() -> Self {
        Self {
            max_distance: 50.0,
            interaction_mask: u32::MAX,
            camera_distance: 10.0,
            disable_when_popup_open: false,
        }
    }
}

impl PickingOptions {
    /// Replace non-finite or negative distances with usable values.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            max_distance: non_negative(
                "picking.max_distance",
                finite_or(self.max_distance, d.max_distance),
            ),
            camera_distance: non_negative(
                "picking.camera_distance",
                finite_or(self.camera_distance, d.camera_distance),
            ),
            ..self
        }
    }
}
