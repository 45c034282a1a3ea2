//! Recorded interaction traces, replayed headlessly through the engine.
//!
//! A trace is a JSON document holding the screen size, the scene and a list
//! of frames, each with the input events received during it:
//!
//! ```json
//! {
//!   "screen": [1920, 1080],
//!   "scene": { "nodes": [
//!     { "name": "body", "collider": { "shape": "sphere", "center": [0, 0, 0], "radius": 1 },
//!       "annotation": { "title": "Body", "description": "Cast housing" } }
//!   ] },
//!   "frames": [
//!     { "wall": 0.00, "events": [ { "type": "pointer", "id": 0, "phase": "down",
//!                                   "position": [960, 540], "timestamp": 0.0 } ] },
//!     { "wall": 0.05, "events": [ { "type": "pointer", "id": 0, "phase": "up",
//!                                   "position": [960, 540], "timestamp": 0.05 } ] },
//!     { "dt": 0.5, "commands": [ { "command": "close_popup" } ] }
//!   ]
//! }
//! ```

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::engine::{Command, FrameOutput, ShowcaseEngine};
use crate::error::PartviewError;
use crate::input::InputEvent;
use crate::options::Options;
use crate::picking::SceneGraph;
use crate::util::frame_timing::FrameClock;

/// Frame delta used when a frame gives neither `wall` nor `dt`.
const DEFAULT_FRAME_DELTA: f32 = 1.0 / 60.0;

/// One recorded frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceFrame {
    /// Absolute wall time in seconds. Takes precedence over `dt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall: Option<f64>,
    /// Seconds since the previous frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt: Option<f32>,
    /// Raw input received before this frame.
    pub events: Vec<InputEvent>,
    /// Host commands (close button, background click) executed before
    /// this frame's input.
    pub commands: Vec<Command>,
}

/// A scene plus the input that was applied to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Screen size in pixels.
    pub screen: [f32; 2],
    /// Pickable scene.
    #[serde(default)]
    pub scene: SceneGraph,
    /// Recorded frames, in order.
    #[serde(default)]
    pub frames: Vec<TraceFrame>,
}

impl Trace {
    /// Parse a trace from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PartviewError::TraceParse`] if the text is not a valid trace.
    pub fn from_json(text: &str) -> Result<Self, PartviewError> {
        serde_json::from_str(text).map_err(|e| PartviewError::TraceParse(e.to_string()))
    }

    /// Load a trace from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`PartviewError::Io`] if the file cannot be read and
    /// [`PartviewError::TraceParse`] if it is not a valid trace.
    pub fn load(path: &Path) -> Result<Self, PartviewError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Run every frame through a fresh engine and collect the outputs.
    #[must_use]
    pub fn replay(&self, options: Options) -> Vec<FrameOutput> {
        let mut engine = ShowcaseEngine::new(
            options,
            Box::new(self.scene.clone()),
            Vec2::from(self.screen),
        );
        let mut clock = FrameClock::new();
        log::info!("replaying {} frames", self.frames.len());

        self.frames
            .iter()
            .map(|frame| {
                for command in &frame.commands {
                    let _ = engine.execute(command.clone());
                }
                for event in &frame.events {
                    engine.handle_event(*event);
                }
                let tick = match frame.wall {
                    Some(wall) => clock.tick(wall),
                    None => clock.advance(frame.dt.unwrap_or(DEFAULT_FRAME_DELTA)),
                };
                engine.tick(tick)
            })
            .collect()
    }
}
