//! Tap-versus-drag classification and two-pointer decomposition.
//!
//! A *session* starts at the first pointer-down after all pointers were
//! released and ends when the last pointer lifts. Within a session the
//! classifier tracks whether the gesture can still become a tap; once it
//! cannot, it never can again.

use glam::Vec2;
use rustc_hash::FxHashSet;

use super::event::{PointerId, PointerSample};
use crate::options::GestureOptions;
use crate::util::smoothing::delta_angle;

/// Whether the current session can still produce a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No pointer is down.
    #[default]
    Idle,
    /// One pointer is down and still within the tap thresholds.
    Tracking,
    /// The session can no longer become a tap.
    Invalidated,
}

/// Per-session classifier state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    /// Current phase.
    pub phase: GesturePhase,
    /// First sample of the session's primary pointer.
    pub start: Option<PointerSample>,
    /// Most recent sample of the primary pointer.
    pub last: Option<PointerSample>,
    /// Pointers currently down.
    pub pointer_count: usize,
}

/// Emitted on pointer-up when the session qualified as a tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapConfirmed {
    /// Screen position of the release.
    pub position: Vec2,
}

/// Distance and angle change between two frames of a two-pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PinchTwist {
    /// Change in pointer separation, in pixels (positive = spreading).
    pub pinch_delta: f32,
    /// Change in the angle of the line between pointers, in degrees,
    /// wrapped to (-180, 180].
    pub twist_delta: f32,
}

/// Decompose two-pointer motion into pinch and twist deltas.
///
/// `prev` and `cur` hold the same two pointers, in the same order, at the
/// previous and current frame.
#[must_use]
pub fn decompose_pinch_twist(prev: [Vec2; 2], cur: [Vec2; 2]) -> PinchTwist {
    let prev_span = prev[1] - prev[0];
    let cur_span = cur[1] - cur[0];

    let prev_angle = prev_span.y.atan2(prev_span.x).to_degrees();
    let cur_angle = cur_span.y.atan2(cur_span.x).to_degrees();

    PinchTwist {
        pinch_delta: cur_span.length() - prev_span.length(),
        twist_delta: delta_angle(prev_angle, cur_angle),
    }
}

/// Decides, per session, whether a press/release pair is a tap.
pub struct GestureClassifier {
    options: GestureOptions,
    state: GestureState,
    /// Pointer that started the session.
    primary: Option<PointerId>,
    /// All pointers currently down.
    active: FxHashSet<PointerId>,
}

impl GestureClassifier {
    /// Classifier with the given thresholds.
    #[must_use]
    pub fn new(options: GestureOptions) -> Self {
        Self {
            options,
            state: GestureState::default(),
            primary: None,
            active: FxHashSet::default(),
        }
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.state.phase
    }

    /// Replace the thresholds. Takes effect on the next sample.
    pub fn set_options(&mut self, options: GestureOptions) {
        self.options = options;
    }

    /// A pointer was pressed.
    pub fn on_pointer_down(&mut self, id: PointerId, sample: PointerSample) {
        if !self.active.insert(id) {
            // A repeated down never re-arms the session.
            log::debug!("duplicate pointer-down for {id:?}");
            self.invalidate("duplicate pointer-down");
            return;
        }
        self.state.pointer_count = self.active.len();

        if self.state.pointer_count == 1 {
            self.primary = Some(id);
            self.state.phase = GesturePhase::Tracking;
            self.state.start = Some(sample);
            self.state.last = Some(sample);
        } else {
            self.invalidate("second pointer");
        }
    }

    /// A pressed pointer moved.
    pub fn on_pointer_move(&mut self, id: PointerId, sample: PointerSample) {
        if self.primary != Some(id) {
            return;
        }
        self.state.last = Some(sample);
        if self.state.phase == GesturePhase::Tracking
            && !self.within_thresholds(sample)
        {
            self.invalidate("moved or held too long");
        }
    }

    /// A pointer was released. Returns the tap if the session qualified.
    pub fn on_pointer_up(
        &mut self,
        id: PointerId,
        sample: PointerSample,
    ) -> Option<TapConfirmed> {
        if !self.active.remove(&id) {
            return None;
        }
        if self.primary == Some(id) {
            self.state.last = Some(sample);
        }

        let tap = (self.active.is_empty()
            && self.state.phase == GesturePhase::Tracking
            && self.primary == Some(id)
            && self.within_thresholds(sample))
        .then_some(TapConfirmed {
            position: sample.position,
        });

        if let Some(tap) = tap {
            log::debug!("tap confirmed at {:?}", tap.position);
        }

        self.state.pointer_count = self.active.len();
        if self.active.is_empty() {
            self.reset();
        }
        tap
    }

    /// The platform cancelled a pointer.
    pub fn on_pointer_cancel(&mut self, id: PointerId) {
        if !self.active.remove(&id) {
            return;
        }
        self.invalidate("pointer cancelled");
        self.state.pointer_count = self.active.len();
        if self.active.is_empty() {
            self.reset();
        }
    }

    /// Invalidate a held press once it outlives the tap time, even without
    /// further movement.
    pub fn poll(&mut self, now: f64) {
        if self.state.phase != GesturePhase::Tracking {
            return;
        }
        if let Some(start) = self.state.start {
            if now - start.timestamp > f64::from(self.options.tap_max_time) {
                self.invalidate("held too long");
            }
        }
    }

    fn within_thresholds(&self, sample: PointerSample) -> bool {
        let Some(start) = self.state.start else {
            return false;
        };
        let moved = (sample.position - start.position).length();
        let elapsed = sample.timestamp - start.timestamp;
        moved <= self.options.tap_max_move_pixels
            && elapsed <= f64::from(self.options.tap_max_time)
    }

    fn invalidate(&mut self, reason: &str) {
        if self.state.phase != GesturePhase::Invalidated {
            log::debug!("tap tracking invalidated: {reason}");
        }
        self.state.phase = GesturePhase::Invalidated;
    }

    fn reset(&mut self) {
        self.state = GestureState::default();
        self.primary = None;
    }
}
