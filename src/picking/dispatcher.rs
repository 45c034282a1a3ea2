//! Turns a confirmed tap into an annotation lookup.

use glam::{Quat, Vec2};

use super::scene::{AnnotationRecord, LayerMask, ScenePicker};
use crate::camera::{Camera, Ray};
use crate::options::PickingOptions;

/// Ray-tests confirmed taps against the scene and resolves annotations.
///
/// Every failure mode (no camera, pointer over UI, no hit, hit without
/// metadata) is a silent `None`. Only call [`PickDispatcher::try_pick`] on a
/// confirmed tap, never per frame.
pub struct PickDispatcher {
    options: PickingOptions,
    camera: Option<Camera>,
    /// Model rotation about the orbit pivot, as last rendered.
    model_rotation: Quat,
    scene: Box<dyn ScenePicker>,
}

impl PickDispatcher {
    /// Dispatcher over `scene` with no camera yet.
    #[must_use]
    pub fn new(options: PickingOptions, scene: Box<dyn ScenePicker>) -> Self {
        Self {
            options,
            camera: None,
            model_rotation: Quat::IDENTITY,
            scene,
        }
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &PickingOptions {
        &self.options
    }

    /// Replace the options.
    pub fn set_options(&mut self, options: PickingOptions) {
        self.options = options;
    }

    /// Set or clear the camera used to build pick rays.
    pub fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    /// Current camera, if any.
    #[must_use]
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Replace the scene.
    pub fn set_scene(&mut self, scene: Box<dyn ScenePicker>) {
        self.scene = scene;
    }

    /// Sync with what was just rendered: FOV and model rotation.
    pub fn update_view(&mut self, fov: f32, model_rotation: Quat) {
        if let Some(camera) = self.camera.as_mut() {
            camera.fovy = fov;
        }
        self.model_rotation = model_rotation;
    }

    /// Resize the camera viewport.
    pub fn set_viewport(&mut self, size: Vec2) {
        if let Some(camera) = self.camera.as_mut() {
            camera.viewport = size;
        }
    }

    /// Annotation under `screen_position`, if any.
    #[must_use]
    pub fn try_pick(
        &self,
        screen_position: Vec2,
        over_blocking_ui: bool,
    ) -> Option<AnnotationRecord> {
        if over_blocking_ui {
            log::debug!("pick skipped: pointer over UI");
            return None;
        }
        let Some(camera) = self.camera.as_ref() else {
            log::debug!("pick skipped: no camera");
            return None;
        };
        let world_ray = camera.screen_point_to_ray(screen_position)?;

        // Colliders live in model space; undo the orbit rotation.
        let inverse = self.model_rotation.inverse();
        let ray = Ray::new(inverse * world_ray.origin, inverse * world_ray.direction);

        let hit = self.scene.raycast(
            &ray,
            self.options.max_distance,
            LayerMask(self.options.interaction_mask),
        )?;
        let record = self.scene.find_annotation(hit.object);
        match record {
            Some(record) => {
                log::info!("picked '{}' at distance {:.2}", record.title, hit.distance);
            }
            None => log::debug!("hit {:?} has no annotation", hit.object),
        }
        record.cloned()
    }
}
