//! Popup state machine: placement, slide and fade.
//!
//! ```text
//!            show                 tweens done
//!  Hidden ─────────▶ Showing ─────────────────▶ Shown
//!    ▲                 │ ▲ show                   │
//!    │ tweens done     │ │                  hide  │
//!    │                 ▼ │                        │
//!    └──────────────── Hiding ◀───────────────────┘
//! ```
//!
//! `show` is accepted in every phase and always restarts from the offscreen
//! slide position; `hide` is ignored unless the popup is showing or shown.
//! At most one animation (a position tween plus an opacity tween) is live;
//! starting another cancels it first.

use std::rc::Rc;

use glam::Vec2;
use serde::Serialize;

use super::layout::{ContentMeasurer, LayoutRebuildScheduler};
use super::tween::{
    AnimationBackend, TweenHandle, TweenProperty, TweenRequest, TweenRunner, TweenValue,
};
use crate::options::PopupOptions;
use crate::picking::AnnotationRecord;
use crate::util::easing::EasingFunction;

/// Opacity above which an interactive popup counts as open.
const OPEN_OPACITY: f32 = 0.9;

/// Lifecycle phase of the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PopupPhase {
    /// Offscreen, transparent, non-interactive.
    #[default]
    Hidden,
    /// Sliding and fading in.
    Showing,
    /// Fully visible.
    Shown,
    /// Sliding and fading out.
    Hiding,
}

/// Screen facts needed to place the popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorContext {
    /// Screen size in pixels.
    pub screen_size: Vec2,
    /// Tap that triggered the popup, in screen pixels.
    pub tap_position: Vec2,
}

impl AnchorContext {
    /// Landscape iff wider than tall.
    #[must_use]
    pub fn is_landscape(&self) -> bool {
        self.screen_size.x > self.screen_size.y
    }
}

/// What the host renders for the popup this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopupVisual {
    /// Lifecycle phase.
    pub phase: PopupPhase,
    /// Position in the canvas' local space.
    pub position: Vec2,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Whether the popup accepts input.
    pub interactive: bool,
    /// Whether the close button is shown.
    pub close_affordance_visible: bool,
    /// Measured content size in local units.
    pub content_size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnimationKind {
    Show,
    Hide,
}

/// One animated property. `handle` is `None` once the end value has been
/// applied directly.
#[derive(Debug, Clone, Copy)]
struct TrackedTween {
    property: TweenProperty,
    handle: Option<TweenHandle>,
    to: TweenValue,
}

#[derive(Debug, Clone, Copy)]
struct ActiveAnimation {
    kind: AnimationKind,
    position: TrackedTween,
    opacity: TrackedTween,
}

/// Layout parameters captured by the measurement closure.
#[derive(Debug, Clone, Copy)]
struct ContentLayout {
    max_width: f32,
    padding: Vec2,
    spacing: f32,
}

impl ContentLayout {
    fn from_options(options: &PopupOptions) -> Self {
        Self {
            max_width: options.max_content_width,
            padding: Vec2::from(options.content_padding),
            spacing: options.content_spacing,
        }
    }

    /// Title stacked over description, padded on every side.
    fn measure(self, measurer: &dyn ContentMeasurer, title: &str, description: &str) -> Vec2 {
        let title = measurer.measure(title, self.max_width);
        let body = measurer.measure(description, self.max_width);
        let gap = if description.is_empty() {
            0.0
        } else {
            self.spacing
        };
        Vec2::new(
            title.x.max(body.x) + 2.0 * self.padding.x,
            title.y + gap + body.y + 2.0 * self.padding.y,
        )
    }
}

/// Shows and hides the annotation popup.
pub struct PopupAnimator {
    options: PopupOptions,
    phase: PopupPhase,
    content: Option<AnnotationRecord>,
    content_size: Vec2,
    position: Vec2,
    target: Vec2,
    /// Slide offset for the current orientation.
    offset: Vec2,
    opacity: f32,
    interactive: bool,
    close_affordance_visible: bool,
    active: Option<ActiveAnimation>,
    backend: Option<Box<dyn AnimationBackend>>,
    measurer: Option<Rc<dyn ContentMeasurer>>,
    rebuild: LayoutRebuildScheduler<Vec2>,
    /// Wall time of the last `advance`; tweens start here.
    now: f64,
}

impl PopupAnimator {
    /// Hidden popup driven by the built-in [`TweenRunner`], with no
    /// measurer.
    #[must_use]
    pub fn new(options: PopupOptions) -> Self {
        let rebuild = LayoutRebuildScheduler::new(options.rebuild_at_end_of_frame);
        let offset = Vec2::new(options.slide_from_offset, 0.0);
        let mut animator = Self {
            options,
            phase: PopupPhase::Hidden,
            content: None,
            content_size: Vec2::ZERO,
            position: offset,
            target: Vec2::ZERO,
            offset,
            opacity: 0.0,
            interactive: false,
            close_affordance_visible: false,
            active: None,
            backend: Some(Box::new(TweenRunner::new())),
            measurer: None,
            rebuild,
            now: 0.0,
        };
        animator.hide_instant();
        animator
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &PopupOptions {
        &self.options
    }

    /// Replace the options. Takes effect at the next `show`/`hide`.
    pub fn set_options(&mut self, options: PopupOptions) {
        self.rebuild.set_deferred(options.rebuild_at_end_of_frame);
        self.options = options;
    }

    /// Swap the animation backend (`None` = apply end values directly).
    /// A running animation jumps to its end.
    pub fn set_backend(&mut self, backend: Option<Box<dyn AnimationBackend>>) {
        self.complete_now();
        self.backend = backend;
    }

    /// Set the content measurer (`None` = content size stays unchanged).
    pub fn set_measurer(&mut self, measurer: Option<Rc<dyn ContentMeasurer>>) {
        self.measurer = measurer;
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> PopupPhase {
        self.phase
    }

    /// Visible enough and accepting input.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.opacity > OPEN_OPACITY && self.interactive
    }

    /// Record currently displayed (kept while hiding).
    #[must_use]
    pub fn content(&self) -> Option<&AnnotationRecord> {
        self.content.as_ref()
    }

    /// Position the popup rests at when shown.
    #[must_use]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Current render state.
    #[must_use]
    pub fn visual(&self) -> PopupVisual {
        PopupVisual {
            phase: self.phase,
            position: self.position,
            opacity: self.opacity,
            interactive: self.interactive,
            close_affordance_visible: self.close_affordance_visible,
            content_size: self.content_size,
        }
    }

    /// Display `record`, sliding in from the side. Valid in every phase;
    /// an animation in flight is replaced.
    pub fn show(&mut self, record: AnnotationRecord, anchor: &AnchorContext) {
        self.cancel_animation();
        if let Some(handle) = self.rebuild.cancel() {
            log::debug!("popup show dropped pending rebuild {handle:?}");
        }
        log::debug!("popup show '{}' from {:?}", record.title, self.phase);

        self.content = Some(record);
        self.rebuild_layout();

        let landscape = anchor.is_landscape();
        self.target = self.target_position(anchor, landscape);
        self.offset = self.slide_offset(landscape);
        self.position = self.target + self.offset;
        self.opacity = 0.0;
        self.interactive = true;
        self.close_affordance_visible = true;
        self.phase = PopupPhase::Showing;

        let duration = self.options.slide_duration;
        let position = self.start_tween(
            TweenProperty::Position,
            TweenValue::Vec2(self.position),
            TweenValue::Vec2(self.target),
            duration,
            self.options.show_ease,
        );
        let opacity = self.start_tween(
            TweenProperty::Opacity,
            TweenValue::Scalar(0.0),
            TweenValue::Scalar(1.0),
            duration * self.options.fade_show_ratio,
            EasingFunction::SineOut,
        );
        self.active = Some(ActiveAnimation {
            kind: AnimationKind::Show,
            position,
            opacity,
        });
    }

    /// The screen changed orientation. Later hides slide out toward the
    /// side that matches it; a hidden popup parks there too.
    pub fn set_landscape(&mut self, landscape: bool) {
        self.offset = self.slide_offset(landscape);
        if self.phase == PopupPhase::Hidden {
            self.position = self.target + self.offset;
        }
    }

    /// Slide out and fade. Ignored unless showing or shown.
    pub fn hide(&mut self) {
        if !matches!(self.phase, PopupPhase::Showing | PopupPhase::Shown) {
            log::debug!("popup hide ignored in {:?}", self.phase);
            return;
        }
        self.cancel_animation();
        if let Some(handle) = self.rebuild.cancel() {
            log::debug!("popup hide dropped pending rebuild {handle:?}");
        }
        log::debug!("popup hide from {:?}", self.phase);

        self.interactive = false;
        self.phase = PopupPhase::Hiding;

        let duration = self.options.slide_duration;
        let position = self.start_tween(
            TweenProperty::Position,
            TweenValue::Vec2(self.position),
            TweenValue::Vec2(self.target + self.offset),
            duration,
            self.options.hide_ease,
        );
        let opacity = self.start_tween(
            TweenProperty::Opacity,
            TweenValue::Scalar(self.opacity),
            TweenValue::Scalar(0.0),
            duration * self.options.fade_hide_ratio,
            EasingFunction::SineIn,
        );
        self.active = Some(ActiveAnimation {
            kind: AnimationKind::Hide,
            position,
            opacity,
        });
    }

    fn slide_offset(&self, landscape: bool) -> Vec2 {
        let dir = if landscape { -1.0 } else { 1.0 };
        Vec2::new(self.options.slide_from_offset * dir, 0.0)
    }

    /// Jump straight to Hidden with no animation.
    pub fn hide_instant(&mut self) {
        self.cancel_animation();
        let _ = self.rebuild.cancel();
        self.phase = PopupPhase::Hidden;
        self.position = self.target + self.offset;
        self.opacity = 0.0;
        self.interactive = false;
        self.close_affordance_visible = false;
    }

    /// Click outside the popup. Returns whether it started hiding.
    pub fn on_background_clicked(&mut self) -> bool {
        if !self.options.click_outside_to_close {
            return false;
        }
        let hiding = matches!(self.phase, PopupPhase::Showing | PopupPhase::Shown);
        self.hide();
        hiding
    }

    /// Frame boundary at wall time `now`: run the deferred layout pass and
    /// sample the running animation.
    pub fn advance(&mut self, now: f64) -> PopupVisual {
        self.now = now;
        if let Some(size) = self.rebuild.run_pending() {
            self.content_size = size;
        }
        if let Some(active) = self.active {
            let position_done = self.sample(active.position, now);
            let opacity_done = self.sample(active.opacity, now);
            if position_done && opacity_done {
                self.finish(active);
            }
        }
        self.visual()
    }

    /// Start one tween, or apply its end value when no backend can run it.
    fn start_tween(
        &mut self,
        property: TweenProperty,
        from: TweenValue,
        to: TweenValue,
        duration: f32,
        ease: EasingFunction,
    ) -> TrackedTween {
        let request = TweenRequest {
            property,
            from,
            to,
            duration,
            ease,
            start_time: self.now,
        };
        let handle = match self.backend.as_mut() {
            Some(backend) => match backend.tween(request) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    log::warn!("{property:?} tween failed ({e}), applying end value");
                    None
                }
            },
            None => {
                log::debug!("no animation backend, applying {property:?} end value");
                None
            }
        };
        if handle.is_none() {
            self.apply(property, to);
        }
        TrackedTween {
            property,
            handle,
            to,
        }
    }

    /// Write the tween's current value. Returns whether it has finished.
    fn sample(&mut self, tween: TrackedTween, now: f64) -> bool {
        let Some(handle) = tween.handle else {
            return true;
        };
        let sample = self
            .backend
            .as_ref()
            .and_then(|backend| backend.sample(handle, now));
        match sample {
            Some(sample) => {
                self.apply(tween.property, sample.value);
                sample.finished
            }
            None => {
                log::debug!("{:?} tween {handle:?} vanished", tween.property);
                self.apply(tween.property, tween.to);
                true
            }
        }
    }

    fn apply(&mut self, property: TweenProperty, value: TweenValue) {
        match (property, value) {
            (TweenProperty::Position, TweenValue::Vec2(p)) => self.position = p,
            (TweenProperty::Opacity, TweenValue::Scalar(o)) => {
                self.opacity = o.clamp(0.0, 1.0);
            }
            _ => log::warn!("ignoring {value:?} for {property:?}"),
        }
    }

    fn finish(&mut self, active: ActiveAnimation) {
        self.release(active);
        self.active = None;
        match active.kind {
            AnimationKind::Show => self.phase = PopupPhase::Shown,
            AnimationKind::Hide => {
                self.close_affordance_visible = false;
                self.phase = PopupPhase::Hidden;
            }
        }
        log::debug!("popup {:?}", self.phase);
    }

    /// Apply a running animation's end values and finish it.
    fn complete_now(&mut self) {
        if let Some(active) = self.active {
            self.apply(active.position.property, active.position.to);
            self.apply(active.opacity.property, active.opacity.to);
            self.finish(active);
        }
    }

    fn cancel_animation(&mut self) {
        if let Some(active) = self.active.take() {
            self.release(active);
        }
    }

    fn release(&mut self, active: ActiveAnimation) {
        if let Some(backend) = self.backend.as_mut() {
            for handle in [active.position.handle, active.opacity.handle]
                .into_iter()
                .flatten()
            {
                backend.cancel(handle);
            }
        }
    }

    fn rebuild_layout(&mut self) {
        let (Some(measurer), Some(record)) = (self.measurer.clone(), self.content.as_ref())
        else {
            return;
        };
        let layout = ContentLayout::from_options(&self.options);
        if !self.options.force_rebuild_layout {
            self.content_size = layout.measure(&*measurer, &record.title, &record.description);
            return;
        }
        let title = record.title.clone();
        let description = record.description.clone();
        self.content_size = self
            .rebuild
            .schedule_rebuild(move || layout.measure(&*measurer, &title, &description));
    }

    fn target_position(&self, anchor: &AnchorContext, landscape: bool) -> Vec2 {
        let screen = anchor.screen_size;
        if landscape {
            if let Some(p) = self.options.landscape_anchor {
                let mut target = self.screen_to_local(Vec2::from(p), screen);
                if self.options.override_landscape_x {
                    target.x = self.options.landscape_target_x;
                }
                return target;
            }
        } else if let Some(p) = self.options.portrait_anchor {
            return self.screen_to_local(Vec2::from(p), screen);
        }
        let fallback = anchor.tap_position + Vec2::from(self.options.screen_offset);
        self.screen_to_local(fallback, screen)
    }

    /// Screen pixels to canvas-local units (scaled, origin at the pivot).
    fn screen_to_local(&self, screen_point: Vec2, screen_size: Vec2) -> Vec2 {
        let scale = self.options.canvas_scale;
        screen_point / scale - (screen_size / scale) * Vec2::from(self.options.canvas_pivot)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::popup::layout::MonospaceMeasurer;
    use crate::popup::tween::tests::FailingBackend;
    use crate::popup::tween::{AnimationError, TweenSample};

    const LANDSCAPE: AnchorContext = AnchorContext {
        screen_size: Vec2::new(1920.0, 1080.0),
        tap_position: Vec2::new(100.0, 100.0),
    };
    const PORTRAIT: AnchorContext = AnchorContext {
        screen_size: Vec2::new(1080.0, 1920.0),
        tap_position: Vec2::new(100.0, 100.0),
    };

    fn record(title: &str) -> AnnotationRecord {
        AnnotationRecord {
            title: title.into(),
            description: "Steel body".into(),
            ..AnnotationRecord::default()
        }
    }

    fn shown(options: PopupOptions) -> PopupAnimator {
        let mut popup = PopupAnimator::new(options);
        popup.show(record("Valve"), &LANDSCAPE);
        let _ = popup.advance(5.0);
        assert_eq!(popup.phase(), PopupPhase::Shown);
        popup
    }

    /// TweenRunner that publishes its live tween count.
    struct CountingBackend {
        inner: TweenRunner,
        live: Rc<Cell<usize>>,
    }

    impl AnimationBackend for CountingBackend {
        fn tween(&mut self, request: TweenRequest) -> Result<TweenHandle, AnimationError> {
            let handle = self.inner.tween(request);
            self.live.set(self.inner.active_count());
            handle
        }

        fn cancel(&mut self, handle: TweenHandle) {
            self.inner.cancel(handle);
            self.live.set(self.inner.active_count());
        }

        fn sample(&self, handle: TweenHandle, now: f64) -> Option<TweenSample> {
            self.inner.sample(handle, now)
        }
    }

    struct CountingMeasurer {
        calls: Cell<u32>,
        inner: MonospaceMeasurer,
    }

    impl ContentMeasurer for CountingMeasurer {
        fn measure(&self, text: &str, max_width: f32) -> Vec2 {
            // Two texts per pass; count the title only.
            if text != "Steel body" {
                self.calls.set(self.calls.get() + 1);
            }
            self.inner.measure(text, max_width)
        }
    }

    fn counting_measurer() -> Rc<CountingMeasurer> {
        Rc::new(CountingMeasurer {
            calls: Cell::new(0),
            inner: MonospaceMeasurer {
                char_width: 10.0,
                line_height: 20.0,
            },
        })
    }

    #[test]
    fn starts_hidden() {
        let popup = PopupAnimator::new(PopupOptions::default());
        let v = popup.visual();
        assert_eq!(v.phase, PopupPhase::Hidden);
        assert_eq!(v.opacity, 0.0);
        assert!(!v.interactive);
        assert!(!v.close_affordance_visible);
        assert!(!popup.is_open());
    }

    #[test]
    fn show_slides_in_then_settles() {
        let mut popup = PopupAnimator::new(PopupOptions::default());
        popup.show(record("Valve"), &LANDSCAPE);

        // Fallback placement: tap + (18, 18), origin at screen center.
        let target = Vec2::new(118.0 - 960.0, 118.0 - 540.0);
        assert_eq!(popup.target(), target);
        let v = popup.visual();
        assert_eq!(v.phase, PopupPhase::Showing);
        assert_eq!(v.position, target + Vec2::new(-520.0, 0.0));
        assert_eq!(v.opacity, 0.0);
        assert!(v.interactive && v.close_affordance_visible);
        assert!(!popup.is_open());

        let mid = popup.advance(0.3);
        assert_eq!(mid.phase, PopupPhase::Showing);
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
        assert!(mid.position.x > target.x - 520.0 && mid.position.x < target.x);

        let end = popup.advance(0.75);
        assert_eq!(end.phase, PopupPhase::Shown);
        assert_eq!(end.position, target);
        assert_eq!(end.opacity, 1.0);
        assert!(popup.is_open());
    }

    #[test]
    fn landscape_anchor_x_is_overridden() {
        let options = PopupOptions {
            landscape_anchor: Some([1500.0, 540.0]),
            ..PopupOptions::default()
        };
        let mut popup = PopupAnimator::new(options.clone());
        popup.show(record("Valve"), &LANDSCAPE);
        assert_eq!(popup.target(), Vec2::new(-1351.0, 0.0));

        let mut popup = PopupAnimator::new(PopupOptions {
            override_landscape_x: false,
            ..options
        });
        popup.show(record("Valve"), &LANDSCAPE);
        assert_eq!(popup.target(), Vec2::new(540.0, 0.0));
    }

    #[test]
    fn portrait_anchor_slides_from_the_right() {
        let mut popup = PopupAnimator::new(PopupOptions {
            portrait_anchor: Some([540.0, 1500.0]),
            landscape_anchor: Some([0.0, 0.0]),
            ..PopupOptions::default()
        });
        popup.show(record("Valve"), &PORTRAIT);
        assert_eq!(popup.target(), Vec2::new(0.0, 540.0));
        assert_eq!(popup.visual().position, Vec2::new(520.0, 540.0));
    }

    #[test]
    fn hide_slides_toward_the_current_orientation() {
        let mut popup = PopupAnimator::new(PopupOptions {
            portrait_anchor: Some([540.0, 1500.0]),
            landscape_anchor: Some([0.0, 0.0]),
            ..PopupOptions::default()
        });
        popup.show(record("Valve"), &PORTRAIT);
        let _ = popup.advance(5.0);
        assert_eq!(popup.phase(), PopupPhase::Shown);

        popup.set_landscape(true);
        popup.hide();
        let _ = popup.advance(10.0);
        assert_eq!(popup.phase(), PopupPhase::Hidden);
        assert_eq!(popup.visual().position, Vec2::new(-520.0, 540.0));

        popup.set_landscape(false);
        assert_eq!(popup.visual().position, Vec2::new(520.0, 540.0));
    }

    #[test]
    fn canvas_scale_divides_screen_pixels() {
        let mut popup = PopupAnimator::new(PopupOptions {
            canvas_scale: 2.0,
            ..PopupOptions::default()
        });
        popup.show(record("Valve"), &LANDSCAPE);
        assert_eq!(popup.target(), Vec2::new(59.0 - 480.0, 59.0 - 270.0));
    }

    #[test]
    fn hide_is_idempotent_and_completes_hidden() {
        let mut popup = PopupAnimator::new(PopupOptions::default());
        popup.hide();
        assert_eq!(popup.phase(), PopupPhase::Hidden);

        let live = Rc::new(Cell::new(0));
        let mut popup = shown(PopupOptions::default());
        popup.set_backend(Some(Box::new(CountingBackend {
            inner: TweenRunner::new(),
            live: Rc::clone(&live),
        })));

        popup.hide();
        assert_eq!(popup.phase(), PopupPhase::Hiding);
        assert!(!popup.visual().interactive);
        assert!(!popup.is_open());
        assert!(popup.visual().close_affordance_visible);
        assert_eq!(live.get(), 2);

        let before = popup.advance(5.2);
        popup.hide();
        assert_eq!(popup.phase(), PopupPhase::Hiding);
        assert_eq!(live.get(), 2);
        assert_eq!(popup.visual(), before);

        let end = popup.advance(6.0);
        assert_eq!(end.phase, PopupPhase::Hidden);
        assert_eq!(end.opacity, 0.0);
        assert!(!end.close_affordance_visible);
        assert_eq!(end.position, popup.target() + Vec2::new(-520.0, 0.0));
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn show_during_hiding_supersedes() {
        let live = Rc::new(Cell::new(0));
        let mut popup = shown(PopupOptions::default());
        popup.set_backend(Some(Box::new(CountingBackend {
            inner: TweenRunner::new(),
            live: Rc::clone(&live),
        })));
        popup.hide();
        let _ = popup.advance(5.3);
        assert_eq!(popup.phase(), PopupPhase::Hiding);

        popup.show(record("Pump"), &LANDSCAPE);
        let v = popup.visual();
        assert_eq!(v.phase, PopupPhase::Showing);
        assert_eq!(v.opacity, 0.0);
        assert!(v.interactive);
        assert_eq!(v.position, popup.target() + Vec2::new(-520.0, 0.0));
        assert_eq!(popup.content().map(|r| r.title.as_str()), Some("Pump"));
        // The hide tweens were cancelled, leaving only the new pair.
        assert_eq!(live.get(), 2);

        let end = popup.advance(7.0);
        assert_eq!(end.phase, PopupPhase::Shown);
        assert_eq!(end.opacity, 1.0);
    }

    #[test]
    fn show_during_showing_restarts() {
        let mut popup = PopupAnimator::new(PopupOptions::default());
        popup.show(record("Valve"), &LANDSCAPE);
        let _ = popup.advance(0.4);
        popup.show(record("Pump"), &PORTRAIT);
        assert_eq!(popup.phase(), PopupPhase::Showing);
        assert_eq!(popup.visual().opacity, 0.0);
        assert_eq!(
            popup.visual().position,
            popup.target() + Vec2::new(520.0, 0.0)
        );
    }

    #[test]
    fn failing_backend_still_reaches_end_states() {
        let mut popup = PopupAnimator::new(PopupOptions::default());
        popup.set_backend(Some(Box::new(FailingBackend)));
        popup.show(record("Valve"), &LANDSCAPE);
        assert_eq!(popup.phase(), PopupPhase::Showing);
        assert_eq!(popup.visual().position, popup.target());
        assert!(popup.is_open());
        assert_eq!(popup.advance(0.0).phase, PopupPhase::Shown);

        popup.hide();
        assert_eq!(popup.visual().opacity, 0.0);
        assert_eq!(popup.advance(0.0).phase, PopupPhase::Hidden);
    }

    #[test]
    fn missing_backend_behaves_like_failing_one() {
        let mut popup = PopupAnimator::new(PopupOptions::default());
        popup.set_backend(None);
        popup.show(record("Valve"), &LANDSCAPE);
        assert_eq!(popup.visual().opacity, 1.0);
        assert_eq!(popup.advance(0.0).phase, PopupPhase::Shown);
    }

    #[test]
    fn content_is_measured_now_and_after_the_frame() {
        let measurer = counting_measurer();
        let shared: Rc<dyn ContentMeasurer> = measurer.clone();
        let mut popup = PopupAnimator::new(PopupOptions::default());
        popup.set_measurer(Some(shared));

        popup.show(record("Valve"), &LANDSCAPE);
        assert_eq!(measurer.calls.get(), 1);
        // "Valve" 50x20 over "Steel body" 100x20, padding (40, 30), gap 20.
        assert_eq!(popup.visual().content_size, Vec2::new(180.0, 120.0));

        let _ = popup.advance(0.1);
        assert_eq!(measurer.calls.get(), 2);
        let _ = popup.advance(0.2);
        assert_eq!(measurer.calls.get(), 2);
    }

    #[test]
    fn hide_cancels_pending_rebuild() {
        let measurer = counting_measurer();
        let shared: Rc<dyn ContentMeasurer> = measurer.clone();
        let mut popup = PopupAnimator::new(PopupOptions::default());
        popup.set_measurer(Some(shared));

        popup.show(record("Valve"), &LANDSCAPE);
        popup.hide();
        let _ = popup.advance(0.1);
        assert_eq!(measurer.calls.get(), 1);
    }

    #[test]
    fn reshow_runs_only_latest_rebuild() {
        let measurer = counting_measurer();
        let shared: Rc<dyn ContentMeasurer> = measurer.clone();
        let mut popup = PopupAnimator::new(PopupOptions::default());
        popup.set_measurer(Some(shared));

        popup.show(record("Valve"), &LANDSCAPE);
        popup.show(record("Pump"), &LANDSCAPE);
        assert_eq!(measurer.calls.get(), 2);
        let _ = popup.advance(0.1);
        assert_eq!(measurer.calls.get(), 3);
    }

    #[test]
    fn immediate_layout_without_forced_rebuild() {
        let measurer = counting_measurer();
        let shared: Rc<dyn ContentMeasurer> = measurer.clone();
        let mut popup = PopupAnimator::new(PopupOptions {
            force_rebuild_layout: false,
            ..PopupOptions::default()
        });
        popup.set_measurer(Some(shared));
        popup.show(record("Valve"), &LANDSCAPE);
        let _ = popup.advance(0.1);
        assert_eq!(measurer.calls.get(), 1);
    }

    #[test]
    fn background_click_respects_option() {
        let mut popup = shown(PopupOptions::default());
        assert!(popup.on_background_clicked());
        assert_eq!(popup.phase(), PopupPhase::Hiding);
        assert!(!popup.on_background_clicked());

        let mut popup = shown(PopupOptions {
            click_outside_to_close: false,
            ..PopupOptions::default()
        });
        assert!(!popup.on_background_clicked());
        assert_eq!(popup.phase(), PopupPhase::Shown);
    }

    #[test]
    fn hide_instant_from_shown() {
        let mut popup = shown(PopupOptions::default());
        popup.hide_instant();
        let v = popup.visual();
        assert_eq!(v.phase, PopupPhase::Hidden);
        assert_eq!(v.opacity, 0.0);
        assert!(!v.close_affordance_visible);
        assert_eq!(v.position, popup.target() + Vec2::new(-520.0, 0.0));
    }
}
