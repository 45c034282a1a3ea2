//! The engine's complete interactive vocabulary.
//!
//! Every operation, whether it came from a pointer, the scroll wheel or a
//! host UI button, is a [`Command`]. The [`InputProcessor`] produces most of
//! them; hosts construct the rest and pass everything to
//! [`ShowcaseEngine::execute`](super::ShowcaseEngine::execute).
//!
//! [`InputProcessor`]: crate::input::InputProcessor

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::input::PointerKind;

/// A discrete or per-frame operation the engine can perform.
///
/// ```ignore
/// engine.execute(Command::Zoom { delta: 0.25 });
/// engine.execute(Command::ClosePopup);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit the model by a one-pointer drag of `delta` pixels.
    Orbit {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
        /// Which sensitivity applies.
        kind: PointerKind,
    },

    /// Roll by a secondary-button drag of `delta` horizontal pixels.
    Roll {
        /// Horizontal drag delta.
        delta: f32,
    },

    /// Zoom by a change in two-pointer separation (pixels).
    Pinch {
        /// Separation change; positive zooms in.
        delta: f32,
    },

    /// Roll by a change in two-pointer angle (degrees).
    Twist {
        /// Signed angle change.
        delta: f32,
    },

    /// Zoom by a scroll wheel step (positive = zoom in).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    // ── Picking and popup ───────────────────────────────────────────
    /// Confirmed tap: pick at `position` and show its annotation.
    Tap {
        /// Screen position in pixels (bottom-left origin).
        position: Vec2,
    },

    /// The popup's close button was pressed.
    ClosePopup,

    /// The background outside the popup was clicked.
    BackgroundClicked,
}
