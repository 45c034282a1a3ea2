//! Input handling: event types, tap classification, and the input
//! processor that converts raw pointer events into engine commands.

/// Platform-agnostic input events.
pub mod event;
/// Tap-versus-drag state machine and pinch/twist decomposition.
pub mod gesture;
/// Converts raw events into engine commands.
pub mod processor;

pub use event::{
    InputEvent, PointerButton, PointerEvent, PointerId, PointerKind,
    PointerPhase, PointerSample,
};
pub use gesture::{
    decompose_pinch_twist, GestureClassifier, GesturePhase, GestureState,
    PinchTwist, TapConfirmed,
};
pub use processor::InputProcessor;
