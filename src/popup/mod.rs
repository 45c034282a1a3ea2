//! Annotation popup: placement, slide/fade animation and content layout.
//!
//! [`PopupAnimator`] owns the Hidden/Showing/Shown/Hiding state machine. It
//! drives its tweens through an [`AnimationBackend`] (the built-in
//! [`TweenRunner`] by default) and measures content through an optional
//! [`ContentMeasurer`], re-measuring once more at the next frame boundary
//! via [`LayoutRebuildScheduler`].

mod animator;
mod layout;
mod tween;

pub use animator::{AnchorContext, PopupAnimator, PopupPhase, PopupVisual};
pub use layout::{ContentMeasurer, LayoutRebuildScheduler, MonospaceMeasurer, RebuildHandle};
pub use tween::{
    AnimationBackend, AnimationError, TweenHandle, TweenProperty, TweenRequest, TweenRunner,
    TweenSample, TweenValue,
};
