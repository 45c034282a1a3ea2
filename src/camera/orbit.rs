//! Smoothed orbit and zoom.
//!
//! Input methods only move the *targets*; [`OrbitCameraController::advance`]
//! eases the current values toward them once per frame. Pitch and FOV are
//! clamped on every write, to targets and to smoothed output alike.

use glam::{EulerRot, Quat};

use crate::options::CameraOptions;
use crate::util::smoothing::{normalize_degrees, smooth_damp, smooth_damp_angle};

/// Scroll deltas at or below this magnitude do not zoom.
const WHEEL_EPSILON: f32 = 1e-4;

/// Orbit targets, smoothed values and spring velocities. Degrees throughout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitState {
    /// Yaw the camera is heading toward. Shifted by whole turns together
    /// with `yaw` on every advance.
    pub target_yaw: f32,
    /// Pitch the camera is heading toward.
    pub target_pitch: f32,
    /// Roll the camera is heading toward. Shifted by whole turns together
    /// with `roll` on every advance.
    pub target_roll: f32,
    /// FOV the camera is heading toward.
    pub target_fov: f32,
    /// Smoothed yaw.
    pub yaw: f32,
    /// Smoothed pitch.
    pub pitch: f32,
    /// Smoothed roll.
    pub roll: f32,
    /// Smoothed FOV.
    pub fov: f32,
    /// Yaw spring velocity.
    pub yaw_velocity: f32,
    /// Pitch spring velocity.
    pub pitch_velocity: f32,
    /// Roll spring velocity.
    pub roll_velocity: f32,
    /// FOV spring velocity.
    pub fov_velocity: f32,
}

/// Per-frame result applied to the model transform and camera.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CameraOutput {
    /// Yaw in `[0, 360)`.
    pub yaw: f32,
    /// Pitch within the configured range.
    pub pitch: f32,
    /// Roll in `[0, 360)`.
    pub roll: f32,
    /// Field of view within the configured range.
    pub fov: f32,
}

impl CameraOutput {
    /// Model rotation: roll about Z, then pitch about X, then yaw about Y.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }
}

/// Converts drag, pinch, twist and wheel deltas into damped orbit output.
pub struct OrbitCameraController {
    options: CameraOptions,
    state: OrbitState,
}

impl OrbitCameraController {
    /// Controller starting at the configured initial orientation and FOV.
    /// Out-of-range options are sanitized first.
    #[must_use]
    pub fn new(options: CameraOptions) -> Self {
        let options = options.sanitized();
        let [pitch, yaw, roll] = options.initial_euler;
        let pitch = pitch.clamp(options.min_pitch, options.max_pitch);
        let fov = options.initial_fov.clamp(options.min_fov, options.max_fov);
        let state = OrbitState {
            target_yaw: yaw,
            target_pitch: pitch,
            target_roll: roll,
            target_fov: fov,
            yaw,
            pitch,
            roll,
            fov,
            ..OrbitState::default()
        };
        Self { options, state }
    }

    /// Current targets, smoothed values and velocities.
    #[must_use]
    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    /// Replace the tuning and re-clamp targets into the new ranges.
    pub fn set_options(&mut self, options: CameraOptions) {
        self.options = options.sanitized();
        self.clamp_targets();
        self.state.pitch = self.clamp_pitch(self.state.pitch);
        self.state.fov = self.clamp_fov(self.state.fov);
    }

    /// Touch drag in pixels.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        self.rotate(dx, dy, self.options.rotate_speed);
    }

    /// Mouse drag in pixels.
    pub fn apply_mouse_drag(&mut self, dx: f32, dy: f32) {
        self.rotate(dx, dy, self.options.mouse_rotate_speed);
    }

    /// Secondary-button horizontal drag in pixels. No-op unless roll is
    /// enabled.
    pub fn apply_roll_drag(&mut self, dx: f32) {
        if self.options.enable_roll && dx.is_finite() {
            self.state.target_roll += dx * self.options.mouse_rotate_speed;
        }
    }

    /// Change in two-pointer separation, in pixels.
    pub fn apply_pinch(&mut self, pinch_delta: f32) {
        if pinch_delta.is_finite() {
            self.zoom(pinch_delta * self.options.pinch_to_fov_speed);
        }
    }

    /// Change in two-pointer angle, in degrees. No-op unless roll is enabled.
    pub fn apply_twist(&mut self, twist_delta: f32) {
        if self.options.enable_roll && twist_delta.is_finite() {
            self.state.target_roll += twist_delta * self.options.roll_speed;
        }
    }

    /// Scroll wheel delta (positive = zoom in).
    pub fn apply_wheel(&mut self, scroll_delta: f32) {
        if scroll_delta.is_finite() && scroll_delta.abs() > WHEEL_EPSILON {
            self.zoom(scroll_delta * self.options.wheel_to_fov_speed);
        }
    }

    /// Ease current values toward their targets. Call exactly once per
    /// rendered frame, whether or not any input arrived.
    pub fn advance(&mut self, dt: f32) -> CameraOutput {
        let smooth = self.options.smooth_time;
        let s = &mut self.state;

        s.yaw = smooth_damp_angle(s.yaw, s.target_yaw, &mut s.yaw_velocity, smooth, dt);
        s.roll =
            smooth_damp_angle(s.roll, s.target_roll, &mut s.roll_velocity, smooth, dt);
        let pitch =
            smooth_damp(s.pitch, s.target_pitch, &mut s.pitch_velocity, smooth, dt);
        let fov = smooth_damp(
            s.fov,
            s.target_fov,
            &mut s.fov_velocity,
            self.options.fov_smooth_time,
            dt,
        );

        self.state.pitch = self.clamp_pitch(pitch);
        self.state.fov = self.clamp_fov(fov);
        self.wrap_angles();
        self.output()
    }

    /// Current smoothed output without advancing.
    #[must_use]
    pub fn output(&self) -> CameraOutput {
        CameraOutput {
            yaw: normalize_degrees(self.state.yaw),
            pitch: self.state.pitch,
            roll: normalize_degrees(self.state.roll),
            fov: self.state.fov,
        }
    }

    fn rotate(&mut self, dx: f32, dy: f32, speed: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.state.target_yaw += dx * speed;
        self.state.target_pitch =
            self.clamp_pitch(self.state.target_pitch - dy * speed);
    }

    fn zoom(&mut self, fov_change: f32) {
        self.state.target_fov = self.clamp_fov(self.state.target_fov - fov_change);
    }

    /// Keep yaw and roll near `[0, 360)`. Each target moves by the same
    /// whole turns as its current value, so their difference is unchanged.
    fn wrap_angles(&mut self) {
        let s = &mut self.state;
        let yaw = normalize_degrees(s.yaw);
        s.target_yaw += yaw - s.yaw;
        s.yaw = yaw;
        let roll = normalize_degrees(s.roll);
        s.target_roll += roll - s.roll;
        s.roll = roll;
    }

    fn clamp_targets(&mut self) {
        self.state.target_pitch = self.clamp_pitch(self.state.target_pitch);
        self.state.target_fov = self.clamp_fov(self.state.target_fov);
    }

    fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(self.options.min_pitch, self.options.max_pitch)
    }

    fn clamp_fov(&self, fov: f32) -> f32 {
        fov.clamp(self.options.min_fov, self.options.max_fov)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn controller() -> OrbitCameraController {
        OrbitCameraController::new(CameraOptions {
            initial_fov: 50.0,
            ..CameraOptions::default()
        })
    }

    #[test]
    fn drag_moves_targets_by_sensitivity() {
        let mut cam = controller();
        cam.apply_drag(10.0, 5.0);
        assert!((cam.state().target_yaw - 2.0).abs() < 1e-5);
        assert!((cam.state().target_pitch + 1.0).abs() < 1e-5);
    }

    #[test]
    fn pitch_target_clamps_immediately() {
        let mut cam = controller();
        cam.apply_drag(0.0, -10_000.0);
        assert_eq!(cam.state().target_pitch, 80.0);
        cam.apply_drag(0.0, 10_000.0);
        assert_eq!(cam.state().target_pitch, -80.0);
    }

    #[test]
    fn pinch_reduces_fov_by_exact_amount() {
        let mut cam = controller();
        cam.apply_pinch(100.0);
        assert!((cam.state().target_fov - 42.0).abs() < 1e-4);
    }

    #[test]
    fn wheel_and_pinch_sensitivities_are_independent() {
        let mut cam = controller();
        cam.apply_wheel(0.25);
        assert!((cam.state().target_fov - 45.0).abs() < 1e-4);
        cam.apply_wheel(0.00001);
        assert!((cam.state().target_fov - 45.0).abs() < 1e-4);
    }

    #[test]
    fn fov_target_clamps() {
        let mut cam = controller();
        cam.apply_pinch(10_000.0);
        assert_eq!(cam.state().target_fov, 25.0);
        cam.apply_wheel(-100.0);
        assert_eq!(cam.state().target_fov, 60.0);
    }

    #[test]
    fn clamp_invariant_holds_every_frame() {
        let mut cam = controller();
        let drags = [
            (0.0, -900.0),
            (40.0, 1200.0),
            (-5.0, -3.0),
            (0.0, 50_000.0),
        ];
        for (i, (dx, dy)) in drags.iter().cycle().take(64).enumerate() {
            cam.apply_drag(*dx, *dy);
            cam.apply_pinch(if i % 2 == 0 { 500.0 } else { -700.0 });
            let out = cam.advance(DT);
            assert!((-80.0..=80.0).contains(&out.pitch), "pitch {}", out.pitch);
            assert!((25.0..=60.0).contains(&out.fov), "fov {}", out.fov);
            let s = cam.state();
            assert!((-80.0..=80.0).contains(&s.target_pitch));
            assert!((25.0..=60.0).contains(&s.target_fov));
        }
    }

    #[test]
    fn smoothing_converges_without_overshoot() {
        let mut cam = controller();
        cam.apply_drag(100.0, -100.0); // +20 yaw, +20 pitch
        let mut prev = cam.output();
        for _ in 0..120 {
            let out = cam.advance(DT);
            assert!(out.yaw >= prev.yaw && out.yaw <= 20.0 + 1e-3);
            assert!(out.pitch >= prev.pitch && out.pitch <= 20.0 + 1e-3);
            prev = out;
        }
        assert!((prev.yaw - 20.0).abs() < 1e-2);
        assert!((prev.pitch - 20.0).abs() < 1e-2);
    }

    #[test]
    fn yaw_wraps_the_short_way() {
        let mut cam = OrbitCameraController::new(CameraOptions {
            initial_euler: [0.0, 350.0, 0.0],
            ..CameraOptions::default()
        });
        // Target 370° is the same heading as 10°: a 20° move, not 340°.
        cam.apply_drag(100.0, 0.0);
        let first = cam.advance(DT);
        assert!(first.yaw > 350.0 || first.yaw < 10.0, "yaw {}", first.yaw);
        for _ in 0..120 {
            let _ = cam.advance(DT);
        }
        assert!((cam.output().yaw - 10.0).abs() < 1e-2);
    }

    #[test]
    fn reversed_or_nan_ranges_are_sanitized() {
        let mut cam = OrbitCameraController::new(CameraOptions {
            min_pitch: 80.0,
            max_pitch: -80.0,
            min_fov: f32::NAN,
            ..CameraOptions::default()
        });
        assert_eq!(cam.options().min_pitch, -80.0);
        assert_eq!(cam.options().max_pitch, 80.0);
        assert!(cam.options().min_fov.is_finite());
        cam.apply_drag(0.0, -10_000.0);
        assert_eq!(cam.state().target_pitch, 80.0);
        let _ = cam.advance(DT);

        cam.set_options(CameraOptions {
            min_fov: 70.0,
            max_fov: 30.0,
            max_pitch: f32::NAN,
            ..CameraOptions::default()
        });
        assert_eq!(cam.options().min_fov, 30.0);
        assert_eq!(cam.options().max_fov, 70.0);
        assert!(cam.options().max_pitch.is_finite());
        cam.apply_pinch(10_000.0);
        assert_eq!(cam.state().target_fov, 30.0);
    }

    #[test]
    fn long_spins_keep_angles_bounded() {
        let mut cam = OrbitCameraController::new(CameraOptions {
            enable_roll: true,
            ..CameraOptions::default()
        });
        for _ in 0..2_000 {
            cam.apply_drag(20.0, 0.0);
            cam.apply_twist(20.0);
            let _ = cam.advance(DT);
        }
        let s = *cam.state();
        assert!((0.0..360.0).contains(&s.yaw), "yaw {}", s.yaw);
        assert!((0.0..360.0).contains(&s.roll), "roll {}", s.roll);
        assert!(s.target_yaw.abs() < 1_000.0, "target_yaw {}", s.target_yaw);
        assert!(s.target_roll.abs() < 1_000.0, "target_roll {}", s.target_roll);

        // Once input stops, the view settles exactly where the targets say.
        for _ in 0..600 {
            let _ = cam.advance(DT);
        }
        let s = *cam.state();
        assert!((normalize_degrees(s.target_yaw) - cam.output().yaw).abs() < 1e-2);
    }

    #[test]
    fn roll_requires_flag() {
        let mut cam = controller();
        cam.apply_twist(30.0);
        cam.apply_roll_drag(30.0);
        assert_eq!(cam.state().target_roll, 0.0);

        let mut cam = OrbitCameraController::new(CameraOptions {
            enable_roll: true,
            ..CameraOptions::default()
        });
        cam.apply_twist(20.0);
        assert!((cam.state().target_roll - 3.0).abs() < 1e-5);
    }

    #[test]
    fn advance_without_input_is_stable() {
        let mut cam = controller();
        let before = cam.output();
        for _ in 0..10 {
            assert_eq!(cam.advance(DT), before);
        }
    }

    #[test]
    fn orientation_matches_yaw() {
        let out = CameraOutput {
            yaw: 90.0,
            pitch: 0.0,
            roll: 0.0,
            fov: 60.0,
        };
        let forward = out.orientation() * glam::Vec3::Z;
        assert!((forward - glam::Vec3::X).length() < 1e-5);
    }
}
