//! Tween backends for the popup's slide and fade.
//!
//! The animator asks an [`AnimationBackend`] for one tween per animated
//! property and samples it every frame. [`TweenRunner`] is the built-in
//! backend; hosts with their own animation system can supply another.

use std::fmt;

use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::util::easing::EasingFunction;

/// Identifies one running tween within its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(pub u64);

/// Which popup property a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    /// Local-space position.
    Position,
    /// Opacity in `[0, 1]`.
    Opacity,
}

/// A value a tween interpolates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    /// Single float.
    Scalar(f32),
    /// 2D vector.
    Vec2(Vec2),
}

impl TweenValue {
    /// Interpolate toward `to` by `t`. `None` if the kinds differ.
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Option<Self> {
        match (self, to) {
            (Self::Scalar(a), Self::Scalar(b)) => Some(Self::Scalar(a + (b - a) * t)),
            (Self::Vec2(a), Self::Vec2(b)) => Some(Self::Vec2(a.lerp(b, t))),
            _ => None,
        }
    }
}

/// Parameters for one tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenRequest {
    /// Property being driven (for logs and host backends).
    pub property: TweenProperty,
    /// Value at the start time.
    pub from: TweenValue,
    /// Value at the end.
    pub to: TweenValue,
    /// Length in seconds. Zero finishes on the first sample.
    pub duration: f32,
    /// Curve applied to normalized progress.
    pub ease: EasingFunction,
    /// Wall-clock seconds the tween starts at.
    pub start_time: f64,
}

/// Value of a tween at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    /// Interpolated value (exactly `to` once finished).
    pub value: TweenValue,
    /// Whether the tween has reached its end.
    pub finished: bool,
}

/// Why a backend refused a tween.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// `from` and `to` are different kinds of value.
    MismatchedValues,
    /// The backend cannot animate right now.
    Unavailable(String),
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MismatchedValues => write!(f, "tween endpoints differ in kind"),
            Self::Unavailable(msg) => write!(f, "animation backend unavailable: {msg}"),
        }
    }
}

impl std::error::Error for AnimationError {}

/// Something that can run tweens.
pub trait AnimationBackend {
    /// Start a tween.
    ///
    /// # Errors
    ///
    /// Returns an [`AnimationError`] if the tween cannot be started; the
    /// caller then applies the end value directly.
    fn tween(&mut self, request: TweenRequest) -> Result<TweenHandle, AnimationError>;

    /// Stop a tween. Unknown handles are ignored.
    fn cancel(&mut self, handle: TweenHandle);

    /// Sample a tween at `now`. `None` for unknown handles.
    fn sample(&self, handle: TweenHandle, now: f64) -> Option<TweenSample>;
}

/// Built-in backend: evaluates tweens from their start time and easing.
#[derive(Debug, Default)]
pub struct TweenRunner {
    next_handle: u64,
    active: FxHashMap<TweenHandle, TweenRequest>,
}

impl TweenRunner {
    /// Runner with no tweens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tweens not yet cancelled.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl AnimationBackend for TweenRunner {
    fn tween(&mut self, request: TweenRequest) -> Result<TweenHandle, AnimationError> {
        if request.from.lerp(request.to, 0.0).is_none() {
            return Err(AnimationError::MismatchedValues);
        }
        let handle = TweenHandle(self.next_handle);
        self.next_handle += 1;
        let _ = self.active.insert(handle, request);
        Ok(handle)
    }

    fn cancel(&mut self, handle: TweenHandle) {
        let _ = self.active.remove(&handle);
    }

    fn sample(&self, handle: TweenHandle, now: f64) -> Option<TweenSample> {
        let request = self.active.get(&handle)?;
        let progress = if request.duration > 0.0 {
            ((now - request.start_time) / f64::from(request.duration)).clamp(0.0, 1.0)
                as f32
        } else {
            1.0
        };
        if progress >= 1.0 {
            return Some(TweenSample {
                value: request.to,
                finished: true,
            });
        }
        let value = request
            .from
            .lerp(request.to, request.ease.evaluate(progress))?;
        Some(TweenSample {
            value,
            finished: false,
        })
    }
}
