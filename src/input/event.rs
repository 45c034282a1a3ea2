use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor), which
/// classifies gestures and turns pointer motion into
/// [`Command`](crate::engine::Command)s.
///
/// Screen positions are in pixels with the origin at the bottom-left corner
/// and y pointing up.
///
/// # Example
///
/// ```ignore
/// engine.handle_event(InputEvent::Pointer(PointerEvent::touch(
///     PointerId(0),
///     PointerPhase::Down,
///     Vec2::new(100.0, 100.0),
///     0.0,
/// )));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// A pointer (finger or mouse) changed state.
    Pointer(PointerEvent),
    /// Scroll wheel (positive = zoom in).
    Wheel {
        /// Scroll amount in wheel units.
        delta: f32,
    },
}

/// Identifies one pointer for the lifetime of its press.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PointerId(pub u64);

impl PointerId {
    /// Id reserved for a mouse button. Each button is its own pointer, so
    /// pressing a second button never re-presses the first.
    #[must_use]
    pub const fn mouse(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => Self(u64::MAX),
            PointerButton::Secondary => Self(u64::MAX - 1),
        }
    }
}

/// What kind of device produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    /// A finger on a touch screen.
    #[default]
    Touch,
    /// A mouse or trackpad cursor.
    Mouse,
}

/// Which button a mouse pointer is pressing. Touches are always primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Left button or finger.
    #[default]
    Primary,
    /// Right button.
    Secondary,
}

/// Lifecycle phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    /// Pointer pressed.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released.
    Up,
    /// The platform took the pointer away (e.g. system gesture).
    Cancel,
}

/// One raw pointer sample from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Which pointer this sample belongs to.
    pub id: PointerId,
    /// Touch or mouse.
    #[serde(default)]
    pub kind: PointerKind,
    /// Pressed button (always primary for touches).
    #[serde(default)]
    pub button: PointerButton,
    /// Lifecycle phase.
    pub phase: PointerPhase,
    /// Screen position in pixels (bottom-left origin).
    pub position: Vec2,
    /// Host timestamp in seconds.
    pub timestamp: f64,
    /// Whether the pointer is over UI that blocks world interaction.
    #[serde(default)]
    pub over_blocking_ui: bool,
}

impl PointerEvent {
    /// A touch sample that is not over any UI.
    #[must_use]
    pub fn touch(
        id: PointerId,
        phase: PointerPhase,
        position: Vec2,
        timestamp: f64,
    ) -> Self {
        Self {
            id,
            kind: PointerKind::Touch,
            button: PointerButton::Primary,
            phase,
            position,
            timestamp,
            over_blocking_ui: false,
        }
    }

    /// A mouse sample for `button`.
    #[must_use]
    pub fn mouse(
        button: PointerButton,
        phase: PointerPhase,
        position: Vec2,
        timestamp: f64,
    ) -> Self {
        Self {
            id: PointerId::mouse(button),
            kind: PointerKind::Mouse,
            button,
            phase,
            position,
            timestamp,
            over_blocking_ui: false,
        }
    }

    /// Mark this sample as landing on blocking UI.
    #[must_use]
    pub fn over_ui(mut self) -> Self {
        self.over_blocking_ui = true;
        self
    }

    /// The position/time part of this event.
    #[must_use]
    pub fn sample(&self) -> PointerSample {
        PointerSample {
            position: self.position,
            timestamp: self.timestamp,
        }
    }
}

/// Position and time of a pointer, as seen by the gesture classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Screen position in pixels.
    pub position: Vec2,
    /// Host timestamp in seconds.
    pub timestamp: f64,
}

impl PointerSample {
    /// Sample at `position` and `timestamp`.
    #[must_use]
    pub fn new(position: Vec2, timestamp: f64) -> Self {
        Self {
            position,
            timestamp,
        }
    }
}
