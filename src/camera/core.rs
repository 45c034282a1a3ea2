use glam::{Mat4, Vec2, Vec3};

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

/// A half-line in world or model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` along `direction` (normalized here).
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Camera {
    /// Camera on the +Z axis at `distance`, looking at the origin.
    #[must_use]
    pub fn looking_at_origin(distance: f32, viewport: Vec2, fovy: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            viewport,
            fovy,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Viewport aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect(),
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// World-space ray through a screen point (pixels, bottom-left origin).
    ///
    /// The ray starts on the near plane. Returns `None` for an empty
    /// viewport or a degenerate projection.
    #[must_use]
    pub fn screen_point_to_ray(&self, screen: Vec2) -> Option<Ray> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }
        let ndc = Vec2::new(
            2.0 * screen.x / self.viewport.x - 1.0,
            2.0 * screen.y / self.viewport.y - 1.0,
        );
        let inverse = self.build_matrix().inverse();
        // perspective_rh maps depth to [0, 1]
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        let direction = far - near;
        if !direction.is_finite() || direction.length_squared() == 0.0 {
            return None;
        }
        Some(Ray::new(near, direction))
    }
}
