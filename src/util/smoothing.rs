//! Angle helpers and critically damped smoothing.
//!
//! `smooth_damp` is a critically damped spring approximation: it converges
//! on the target without oscillating, and an overshoot guard snaps the value
//! onto the target if a large step would carry it past.

/// Wrap `t` into `[0, length)`.
#[inline]
#[must_use]
pub fn repeat(t: f32, length: f32) -> f32 {
    (t - (t / length).floor() * length).clamp(0.0, length)
}

/// Smallest signed difference `target - current` in degrees, in (-180, 180].
#[inline]
#[must_use]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = repeat(target - current, 360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
#[must_use]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = repeat(angle, 360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Move `current` toward `target` with critically damped smoothing.
///
/// `velocity` carries the spring state between calls. `smooth_time` is
/// roughly the time to reach the target; values below 1e-4 are raised to
/// it. A non-positive or non-finite `dt` leaves everything untouched.
#[must_use]
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    if !(dt > 0.0 && dt.is_finite()) {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;

    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Overshoot guard
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    output
}

/// Wrap-aware [`smooth_damp`] for angles in degrees.
///
/// The target is re-expressed relative to `current` along the shortest arc,
/// so a move from 350° to 10° travels +20° rather than -340°.
#[must_use]
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, dt)
}
