//! Converts raw pointer events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (the active pointer
//! table, per-frame motion, the tap classifier). It is the only thing that
//! sits between raw host events and the engine's
//! [`execute`](crate::engine::ShowcaseEngine::execute) method.
//!
//! Discrete commands (taps, wheel zoom) are returned as soon as the event
//! arrives. Continuous motion (orbit drags, pinch and twist) is accumulated
//! and emitted once per frame by [`InputProcessor::end_frame`].

use glam::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};

use super::event::{
    InputEvent, PointerButton, PointerEvent, PointerId, PointerKind,
    PointerPhase,
};
use super::gesture::{decompose_pinch_twist, GestureClassifier, GesturePhase};
use crate::engine::command::Command;
use crate::options::GestureOptions;

/// Wheel deltas at or below this magnitude are treated as noise.
const WHEEL_DEAD_ZONE: f32 = 1e-4;

/// A pointer that is currently pressed and not filtered out.
#[derive(Debug, Clone, Copy)]
struct TrackedPointer {
    kind: PointerKind,
    button: PointerButton,
    /// Position at the start of the current frame (or at press).
    frame_start: Vec2,
    /// Latest position.
    current: Vec2,
}

/// Converts raw host events into [`Command`]s.
///
/// # Usage
///
/// ```ignore
/// for event in host_events {
///     if let Some(cmd) = input_processor.handle_event(event) {
///         engine.execute(cmd);
///     }
/// }
/// for cmd in input_processor.end_frame(now) {
///     engine.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    classifier: GestureClassifier,
    pointers: FxHashMap<PointerId, TrackedPointer>,
    /// Pointers whose press landed on blocking UI; ignored until released.
    blocked: FxHashSet<PointerId>,
}

impl InputProcessor {
    /// Create a processor with the given tap thresholds.
    #[must_use]
    pub fn new(options: GestureOptions) -> Self {
        Self {
            classifier: GestureClassifier::new(options),
            pointers: FxHashMap::default(),
            blocked: FxHashSet::default(),
        }
    }

    /// Current tap-classification phase.
    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.classifier.phase()
    }

    /// Number of pressed pointers that reach the world.
    #[must_use]
    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Replace the tap thresholds.
    pub fn set_options(&mut self, options: GestureOptions) {
        self.classifier.set_options(options);
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer),
            InputEvent::Wheel { delta } => (delta.abs() > WHEEL_DEAD_ZONE)
                .then_some(Command::Zoom { delta }),
        }
    }

    /// Close the frame: emit accumulated motion and apply time-based tap
    /// invalidation at `now`.
    pub fn end_frame(&mut self, now: f64) -> Vec<Command> {
        self.classifier.poll(now);

        let mut commands = Vec::new();

        // Each held mouse button drives its own motion.
        let mut buttons: Vec<_> = self
            .pointers
            .iter()
            .filter(|(_, p)| p.kind == PointerKind::Mouse)
            .collect();
        buttons.sort_by_key(|(id, _)| **id);
        for (_, p) in buttons {
            let delta = p.current - p.frame_start;
            if delta != Vec2::ZERO {
                commands.push(drag_command(p.kind, p.button, delta));
            }
        }

        let mut touches: Vec<_> = self
            .pointers
            .iter()
            .filter(|(_, p)| p.kind == PointerKind::Touch)
            .collect();
        touches.sort_by_key(|(id, _)| **id);
        match touches.as_slice() {
            [(_, p)] => {
                let delta = p.current - p.frame_start;
                if delta != Vec2::ZERO {
                    commands.push(drag_command(p.kind, p.button, delta));
                }
            }
            [(_, a), (_, b)] => {
                let motion = decompose_pinch_twist(
                    [a.frame_start, b.frame_start],
                    [a.current, b.current],
                );
                if motion.pinch_delta != 0.0 {
                    commands.push(Command::Pinch {
                        delta: motion.pinch_delta,
                    });
                }
                if motion.twist_delta != 0.0 {
                    commands.push(Command::Twist {
                        delta: motion.twist_delta,
                    });
                }
            }
            _ => {}
        }

        for p in self.pointers.values_mut() {
            p.frame_start = p.current;
        }
        commands
    }

    fn handle_pointer(&mut self, event: PointerEvent) -> Option<Command> {
        let id = event.id;
        if self.blocked.contains(&id) {
            if matches!(event.phase, PointerPhase::Up | PointerPhase::Cancel) {
                let _ = self.blocked.remove(&id);
            }
            return None;
        }

        match event.phase {
            PointerPhase::Down => {
                if event.over_blocking_ui {
                    let _ = self.blocked.insert(id);
                    return None;
                }
                let _ = self.pointers.insert(
                    id,
                    TrackedPointer {
                        kind: event.kind,
                        button: event.button,
                        frame_start: event.position,
                        current: event.position,
                    },
                );
                if can_tap(&event) {
                    self.classifier.on_pointer_down(id, event.sample());
                }
                None
            }
            PointerPhase::Move => {
                let p = self.pointers.get_mut(&id)?;
                p.current = event.position;
                if !event.over_blocking_ui && can_tap(&event) {
                    self.classifier.on_pointer_move(id, event.sample());
                }
                None
            }
            PointerPhase::Up => {
                let _ = self.pointers.remove(&id)?;
                if !can_tap(&event) {
                    return None;
                }
                if event.over_blocking_ui {
                    self.classifier.on_pointer_cancel(id);
                    return None;
                }
                self.classifier
                    .on_pointer_up(id, event.sample())
                    .map(|tap| Command::Tap {
                        position: tap.position,
                    })
            }
            PointerPhase::Cancel => {
                let _ = self.pointers.remove(&id)?;
                self.classifier.on_pointer_cancel(id);
                None
            }
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(GestureOptions::default())
    }
}

/// Touches and the primary mouse button can tap. The secondary button only
/// rolls.
const fn can_tap(event: &PointerEvent) -> bool {
    matches!(
        (event.kind, event.button),
        (PointerKind::Touch, _) | (PointerKind::Mouse, PointerButton::Primary)
    )
}

/// Single-pointer motion: primary drags orbit, secondary mouse drags roll.
fn drag_command(
    kind: PointerKind,
    button: PointerButton,
    delta: Vec2,
) -> Command {
    match (kind, button) {
        (PointerKind::Mouse, PointerButton::Secondary) => {
            Command::Roll { delta: delta.x }
        }
        _ => Command::Orbit { delta, kind },
    }
}
