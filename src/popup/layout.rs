//! Popup content measurement and deferred layout rebuilds.
//!
//! Text measured in the same frame it was assigned can be stale (fonts and
//! wrapping settle a frame later on most hosts), so a content change is
//! measured immediately and, when deferral is on, measured once more at the
//! next frame boundary. Only one deferred pass is ever pending: scheduling
//! again or cancelling drops the previous one.

use glam::Vec2;

/// Sizes text for the popup.
pub trait ContentMeasurer {
    /// Size of `text` wrapped at `max_width` local units.
    fn measure(&self, text: &str, max_width: f32) -> Vec2;
}

/// Fixed-advance measurer with greedy word wrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance per character.
    pub char_width: f32,
    /// Height per line.
    pub line_height: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            char_width: 12.0,
            line_height: 28.0,
        }
    }
}

impl ContentMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, max_width: f32) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        // Characters per line; words longer than this get their own line.
        let limit = if max_width > 0.0 && self.char_width > 0.0 {
            ((max_width / self.char_width).floor() as usize).max(1)
        } else {
            usize::MAX
        };

        let mut lines = 0usize;
        let mut widest = 0usize;
        for paragraph in text.split('\n') {
            let mut current = 0usize;
            lines += 1;
            for word in paragraph.split_whitespace() {
                let len = word.chars().count();
                if current == 0 {
                    current = len;
                } else if current + 1 + len <= limit {
                    current += 1 + len;
                } else {
                    widest = widest.max(current);
                    lines += 1;
                    current = len;
                }
            }
            widest = widest.max(current);
        }
        Vec2::new(
            widest as f32 * self.char_width,
            lines as f32 * self.line_height,
        )
    }
}

/// Identifies one scheduled rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RebuildHandle(pub u64);

struct PendingRebuild<T> {
    handle: RebuildHandle,
    measure: Box<dyn FnMut() -> T>,
}

/// Runs a measurement now and, optionally, once more at the next frame
/// boundary.
pub struct LayoutRebuildScheduler<T> {
    deferred: bool,
    next_handle: u64,
    pending: Option<PendingRebuild<T>>,
}

impl<T: 'static> LayoutRebuildScheduler<T> {
    /// Scheduler; `deferred` enables the second pass.
    #[must_use]
    pub fn new(deferred: bool) -> Self {
        Self {
            deferred,
            next_handle: 0,
            pending: None,
        }
    }

    /// Turn the second pass on or off. Turning it off drops a pending pass.
    pub fn set_deferred(&mut self, deferred: bool) {
        self.deferred = deferred;
        if !deferred {
            let _ = self.cancel();
        }
    }

    /// Run `measure` now and return its result. With deferral on, keep it
    /// as the pending pass, replacing any earlier one.
    pub fn schedule_rebuild(&mut self, mut measure: impl FnMut() -> T + 'static) -> T {
        if let Some(old) = self.cancel() {
            log::debug!("layout rebuild {old:?} superseded");
        }
        let result = measure();
        if self.deferred {
            let handle = RebuildHandle(self.next_handle);
            self.next_handle += 1;
            self.pending = Some(PendingRebuild {
                handle,
                measure: Box::new(measure),
            });
        }
        result
    }

    /// Handle of the pending pass, if any.
    #[must_use]
    pub fn pending(&self) -> Option<RebuildHandle> {
        self.pending.as_ref().map(|p| p.handle)
    }

    /// Drop the pending pass and return its handle.
    pub fn cancel(&mut self) -> Option<RebuildHandle> {
        self.pending.take().map(|p| p.handle)
    }

    /// Frame boundary: run the pending pass, if any, exactly once.
    pub fn run_pending(&mut self) -> Option<T> {
        let mut pending = self.pending.take()?;
        Some((pending.measure)())
    }
}
