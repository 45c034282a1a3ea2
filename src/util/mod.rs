//! Shared utilities for the interaction engine.
//!
//! Helpers for frame timing, easing curves, and angle-aware smoothing.

pub mod easing;
pub mod frame_timing;
pub mod smoothing;
