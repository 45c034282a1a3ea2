use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{finite_or, non_negative, ordered_range};

/// Orbit and zoom parameters. Angles are in degrees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
pub struct CameraOptions {
    /// Degrees of orbit per pixel of touch drag.
    #[schemars(title = "Rotate Speed", range(min = 0.01, max = 2.0), extend("step" = 0.01))]
    pub rotate_speed: f32,
    /// Degrees of orbit per pixel of mouse drag.
    #[schemars(title = "Mouse Rotate Speed", range(min = 0.01, max = 4.0), extend("step" = 0.01))]
    pub mouse_rotate_speed: f32,
    /// Smoothing time constant for yaw/pitch/roll, in seconds.
    #[schemars(title = "Rotation Smoothing", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub smooth_time: f32,
    /// Lowest allowed pitch.
    #[schemars(skip)]
    pub min_pitch: f32,
    /// Highest allowed pitch.
    #[schemars(skip)]
    pub max_pitch: f32,
    /// Whether twist gestures and secondary-button drags roll the model.
    #[schemars(title = "Enable Roll")]
    pub enable_roll: bool,
    /// Degrees of roll per degree of two-finger twist.
    #[schemars(title = "Roll Speed", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub roll_speed: f32,
    /// FOV degrees removed per pixel of pinch spread.
    #[schemars(title = "Pinch Zoom Speed", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub pinch_to_fov_speed: f32,
    /// FOV degrees removed per unit of scroll wheel.
    #[schemars(title = "Wheel Zoom Speed", range(min = 0.0, max = 60.0), extend("step" = 1.0))]
    pub wheel_to_fov_speed: f32,
    /// Narrowest field of view.
    #[schemars(skip)]
    pub min_fov: f32,
    /// Widest field of view.
    #[schemars(skip)]
    pub max_fov: f32,
    /// Smoothing time constant for FOV, in seconds.
    #[schemars(title = "Zoom Smoothing", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub fov_smooth_time: f32,
    /// Field of view at startup (clamped into range).
    #[schemars(skip)]
    pub initial_fov: f32,
    /// Model orientation at startup, as `[pitch, yaw, roll]`.
    #[schemars(skip)]
    pub initial_euler: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            rotate_speed: 0.2,
            mouse_rotate_speed: 0.4,
            smooth_time: 0.08,
            min_pitch: -80.0,
            max_pitch: 80.0,
            enable_roll: false,
            roll_speed: 0.15,
            pinch_to_fov_speed: 0.08,
            wheel_to_fov_speed: 20.0,
            min_fov: 25.0,
            max_fov: 60.0,
            fov_smooth_time: 0.08,
            initial_fov: 60.0,
            initial_euler: [0.0, 0.0, 0.0],
        }
    }
}

impl CameraOptions {
    /// Clamp or replace values that would break the orbit invariants.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let (min_pitch, max_pitch) = ordered_range(
            "camera.pitch",
            finite_or(self.min_pitch, d.min_pitch).clamp(-90.0, 90.0),
            finite_or(self.max_pitch, d.max_pitch).clamp(-90.0, 90.0),
        );
        let (min_fov, max_fov) = ordered_range(
            "camera.fov",
            finite_or(self.min_fov, d.min_fov).clamp(1.0, 179.0),
            finite_or(self.max_fov, d.max_fov).clamp(1.0, 179.0),
        );
        let [pitch, yaw, roll] = self.initial_euler;
        Self {
            rotate_speed: finite_or(self.rotate_speed, d.rotate_speed),
            mouse_rotate_speed: finite_or(
                self.mouse_rotate_speed,
                d.mouse_rotate_speed,
            ),
            smooth_time: non_negative(
                "camera.smooth_time",
                finite_or(self.smooth_time, d.smooth_time),
            ),
            min_pitch,
            max_pitch,
            enable_roll: self.enable_roll,
            roll_speed: finite_or(self.roll_speed, d.roll_speed),
            pinch_to_fov_speed: finite_or(
                self.pinch_to_fov_speed,
                d.pinch_to_fov_speed,
            ),
            wheel_to_fov_speed: finite_or(
                self.wheel_to_fov_speed,
                d.wheel_to_fov_speed,
            ),
            min_fov,
            max_fov,
            fov_smooth_time: non_negative(
                "camera.fov_smooth_time",
                finite_or(self.fov_smooth_time, d.fov_smooth_time),
            ),
            initial_fov: finite_or(self.initial_fov, d.initial_fov),
            initial_euler: [
                finite_or(pitch, 0.0),
                finite_or(yaw, 0.0),
                finite_or(roll, 0.0),
            ],
        }
    }
}
