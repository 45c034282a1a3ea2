use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{finite_or, non_negative};
use crate::util::easing::EasingFunction;

/// Popup placement, animation and layout parameters.
///
/// Positions are in the popup parent's local space (pixels divided by the
/// canvas scale, origin at the canvas pivot) unless noted otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Popup", inline)]
#[serde(default)]
pub struct PopupOptions {
    /// Screen-pixel offset from the tap point used when no anchor applies.
    #[schemars(skip)]
    pub screen_offset: [f32; 2],
    /// Anchor point (screen pixels) used in landscape orientation.
    #[schemars(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landscape_anchor: Option<[f32; 2]>,
    /// Anchor point (screen pixels) used in portrait orientation.
    #[schemars(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portrait_anchor: Option<[f32; 2]>,
    /// Replace the landscape target's x with [`Self::landscape_target_x`].
    #[schemars(title = "Fixed Landscape X")]
    pub override_landscape_x: bool,
    /// Local x used when `override_landscape_x` is set.
    #[schemars(skip)]
    pub landscape_target_x: f32,
    /// Duration of the slide, in seconds.
    #[schemars(title = "Slide Duration", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub slide_duration: f32,
    /// Position curve when showing.
    #[schemars(skip)]
    pub show_ease: EasingFunction,
    /// Position curve when hiding.
    #[schemars(skip)]
    pub hide_ease: EasingFunction,
    /// Horizontal distance the popup slides in from.
    #[schemars(title = "Slide Offset", range(min = 0.0, max = 2000.0), extend("step" = 10.0))]
    pub slide_from_offset: f32,
    /// Fade-in duration as a fraction of the slide duration.
    #[schemars(title = "Fade In Ratio", range(min = 0.1, max = 1.0), extend("step" = 0.05))]
    pub fade_show_ratio: f32,
    /// Fade-out duration as a fraction of the slide duration.
    #[schemars(title = "Fade Out Ratio", range(min = 0.1, max = 1.0), extend("step" = 0.05))]
    pub fade_hide_ratio: f32,
    /// Re-measure content when it changes.
    #[schemars(skip)]
    pub force_rebuild_layout: bool,
    /// Run a second measurement pass after the next frame boundary.
    #[schemars(skip)]
    pub rebuild_at_end_of_frame: bool,
    /// Hide when the background outside the popup is clicked.
    #[schemars(title = "Click Outside To Close")]
    pub click_outside_to_close: bool,
    /// Canvas scale factor (screen pixels per local unit).
    #[schemars(skip)]
    pub canvas_scale: f32,
    /// Canvas pivot as a fraction of the screen size.
    #[schemars(skip)]
    pub canvas_pivot: [f32; 2],
    /// Wrap width for description text, in local units.
    #[schemars(skip)]
    pub max_content_width: f32,
    /// Padding added around measured text, `[x, y]`.
    #[schemars(skip)]
    pub content_padding: [f32; 2],
    /// Vertical gap between title and description.
    #[schemars(skip)]
    pub content_spacing: f32,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            screen_offset: [18.0, 18.0],
            landscape_anchor: None,
            portrait_anchor: None,
            override_landscape_x: true,
            landscape_target_x: -1351.0,
            slide_duration: 0.75,
            show_ease: EasingFunction::QuintOut,
            hide_ease: EasingFunction::QuintIn,
            slide_from_offset: 520.0,
            fade_show_ratio: 0.85,
            fade_hide_ratio: 0.60,
            force_rebuild_layout: true,
            rebuild_at_end_of_frame: true,
            click_outside_to_close: true,
            canvas_scale: 1.0,
            canvas_pivot: [0.5, 0.5],
            max_content_width: 640.0,
            content_padding: [40.0, 30.0],
            content_spacing: 20.0,
        }
    }
}

impl PopupOptions {
    /// Clamp ratios and durations into their valid ranges.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let canvas_scale = finite_or(self.canvas_scale, d.canvas_scale);
        let canvas_scale = if canvas_scale > 0.0 {
            canvas_scale
        } else {
            log::warn!("popup.canvas_scale must be positive, using 1.0");
            1.0
        };
        Self {
            slide_duration: non_negative(
                "popup.slide_duration",
                finite_or(self.slide_duration, d.slide_duration),
            ),
            slide_from_offset: finite_or(
                self.slide_from_offset,
                d.slide_from_offset,
            ),
            landscape_target_x: finite_or(
                self.landscape_target_x,
                d.landscape_target_x,
            ),
            fade_show_ratio: finite_or(self.fade_show_ratio, d.fade_show_ratio)
                .clamp(0.1, 1.0),
            fade_hide_ratio: finite_or(self.fade_hide_ratio, d.fade_hide_ratio)
                .clamp(0.1, 1.0),
            canvas_scale,
            max_content_width: non_negative(
                "popup.max_content_width",
                finite_or(self.max_content_width, d.max_content_width),
            ),
            ..self
        }
    }
}
