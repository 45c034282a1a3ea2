//! Per-frame driver wiring input, camera, picking and the popup together.
//!
//! # Frame order
//!
//! [`ShowcaseEngine::tick`] runs, in order:
//!
//! 1. the popup's frame boundary (deferred layout pass, tween sampling),
//! 2. queued input, producing camera deltas and confirmed taps,
//! 3. pick and popup show for each confirmed tap,
//! 4. camera smoothing,
//! 5. syncing the pick camera with what was rendered.
//!
//! A popup shown during a frame therefore samples its first tween step on
//! the following frame, and a layout rebuild scheduled by `show` runs at the
//! start of the next tick.

pub mod command;

use std::rc::Rc;

use glam::Vec2;
use serde::Serialize;

pub use self::command::Command;
use crate::camera::{Camera, CameraOutput, OrbitCameraController};
use crate::input::{GesturePhase, InputEvent, InputProcessor, PointerKind};
use crate::options::Options;
use crate::picking::{AnnotationRecord, PickDispatcher, ScenePicker};
use crate::popup::{
    AnchorContext, AnimationBackend, ContentMeasurer, PopupAnimator, PopupVisual,
};
use crate::util::frame_timing::FrameTick;

/// Everything the host needs to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutput {
    /// Frame counter from the tick.
    pub frame: u64,
    /// Smoothed model orientation and FOV.
    pub camera: CameraOutput,
    /// Popup render state.
    pub popup: PopupVisual,
    /// Annotation picked this frame, if a tap hit one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<AnnotationRecord>,
}

/// Interactive model showcase: orbit, zoom, tap to inspect.
pub struct ShowcaseEngine {
    options: Options,
    input: InputProcessor,
    camera: OrbitCameraController,
    picker: PickDispatcher,
    popup: PopupAnimator,
    screen_size: Vec2,
    /// Events received since the last tick.
    queued: Vec<InputEvent>,
}

impl ShowcaseEngine {
    /// Engine for `scene` on a screen of `screen_size` pixels. Options are
    /// sanitized first.
    #[must_use]
    pub fn new(options: Options, scene: Box<dyn ScenePicker>, screen_size: Vec2) -> Self {
        let options = options.sanitized();
        let camera = OrbitCameraController::new(options.camera.clone());
        let mut picker = PickDispatcher::new(options.picking.clone(), scene);
        picker.set_camera(Some(Camera::looking_at_origin(
            options.picking.camera_distance,
            screen_size,
            camera.output().fov,
        )));
        let mut popup = PopupAnimator::new(options.popup.clone());
        popup.set_landscape(screen_size.x > screen_size.y);
        log::info!(
            "showcase engine ready ({}x{} px)",
            screen_size.x,
            screen_size.y
        );
        Self {
            input: InputProcessor::new(options.gesture.clone()),
            camera,
            picker,
            popup,
            options,
            screen_size,
            queued: Vec::new(),
        }
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Sanitize and apply new options to every component.
    pub fn set_options(&mut self, options: Options) {
        let options = options.sanitized();
        self.input.set_options(options.gesture.clone());
        self.camera.set_options(options.camera.clone());
        self.picker.set_options(options.picking.clone());
        self.popup.set_options(options.popup.clone());
        self.options = options;
    }

    /// Screen was resized.
    pub fn resize(&mut self, screen_size: Vec2) {
        self.screen_size = screen_size;
        self.picker.set_viewport(screen_size);
        self.popup.set_landscape(screen_size.x > screen_size.y);
    }

    /// Screen size in pixels.
    #[must_use]
    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// Use a host measurer for popup content.
    pub fn set_measurer(&mut self, measurer: Option<Rc<dyn ContentMeasurer>>) {
        self.popup.set_measurer(measurer);
    }

    /// Use a host animation backend for the popup (`None` = no animation).
    pub fn set_animation_backend(&mut self, backend: Option<Box<dyn AnimationBackend>>) {
        self.popup.set_backend(backend);
    }

    /// Orbit controller.
    #[must_use]
    pub fn camera(&self) -> &OrbitCameraController {
        &self.camera
    }

    /// Popup state machine.
    #[must_use]
    pub fn popup(&self) -> &PopupAnimator {
        &self.popup
    }

    /// Pick dispatcher.
    #[must_use]
    pub fn picker(&self) -> &PickDispatcher {
        &self.picker
    }

    /// Current tap-classification phase.
    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.input.gesture_phase()
    }

    /// Queue a raw event for the next [`tick`](Self::tick).
    pub fn handle_event(&mut self, event: InputEvent) {
        self.queued.push(event);
    }

    /// Perform one command now. Returns the annotation a tap picked.
    pub fn execute(&mut self, command: Command) -> Option<AnnotationRecord> {
        match command {
            Command::Orbit { delta, kind } => match kind {
                PointerKind::Touch => self.camera.apply_drag(delta.x, delta.y),
                PointerKind::Mouse => self.camera.apply_mouse_drag(delta.x, delta.y),
            },
            Command::Roll { delta } => self.camera.apply_roll_drag(delta),
            Command::Pinch { delta } => self.camera.apply_pinch(delta),
            Command::Twist { delta } => self.camera.apply_twist(delta),
            Command::Zoom { delta } => self.camera.apply_wheel(delta),
            Command::Tap { position } => return self.tap(position),
            Command::ClosePopup => self.popup.hide(),
            Command::BackgroundClicked => {
                let _ = self.popup.on_background_clicked();
            }
        }
        None
    }

    /// Run one frame.
    pub fn tick(&mut self, tick: FrameTick) -> FrameOutput {
        let _ = self.popup.advance(tick.wall);

        let mut annotation = None;
        for event in std::mem::take(&mut self.queued) {
            if let Some(command) = self.input.handle_event(event) {
                if let Some(record) = self.execute(command) {
                    annotation = Some(record);
                }
            }
        }
        for command in self.input.end_frame(tick.wall) {
            if let Some(record) = self.execute(command) {
                annotation = Some(record);
            }
        }

        let camera = self.camera.advance(tick.delta);
        self.picker.update_view(camera.fov, camera.orientation());

        FrameOutput {
            frame: tick.frame,
            camera,
            popup: self.popup.visual(),
            annotation,
        }
    }

    fn tap(&mut self, position: Vec2) -> Option<AnnotationRecord> {
        if self.options.picking.disable_when_popup_open && self.popup.is_open() {
            log::debug!("tap ignored: popup is open");
            return None;
        }
        // Over-UI pointers are filtered before classification.
        let record = self.picker.try_pick(position, false)?;
        let anchor = AnchorContext {
            screen_size: self.screen_size,
            tap_position: position,
        };
        self.popup.show(record.clone(), &anchor);
        Some(record)
    }
}
