//! Camera system for model inspection.
//!
//! Provides the damped orbit/zoom controller and the perspective camera used
//! to turn screen points into pick rays.

/// Perspective camera and screen-to-ray conversion.
pub mod core;
/// Damped yaw/pitch/roll and FOV controller.
pub mod orbit;

pub use self::core::{Camera, Ray};
pub use orbit::{CameraOutput, OrbitCameraController, OrbitState};
