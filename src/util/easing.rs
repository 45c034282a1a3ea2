//! Easing functions for tween interpolation.
//!
//! Provides the curves used by the popup slide/fade tweens. All functions
//! are designed for <100ns evaluation time.

use std::f32::consts::FRAC_PI_2;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Quintic ease-in (very slow start, sharp finish).
    QuintIn,
    /// Quintic ease-out (sharp start, long settle).
    QuintOut,
    /// Sinusoidal ease-in.
    SineIn,
    /// Sinusoidal ease-out.
    SineOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control value.
        c1: f32,
        /// Second control value.
        c2: f32,
    },
}

impl EasingFunction {
    /// Default easing function: CubicHermite with c1=0.33, c2=1.0 for natural
    /// ease-out feel.
    pub const DEFAULT: EasingFunction =
        EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::QuintIn => t.powi(5),
            EasingFunction::QuintOut => 1.0 - (1.0 - t).powi(5),
            EasingFunction::SineIn => 1.0 - (t * FRAC_PI_2).cos(),
            EasingFunction::SineOut => (t * FRAC_PI_2).sin(),
            EasingFunction::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
