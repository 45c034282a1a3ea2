//! Scene-side collaborators for tap picking.
//!
//! [`ScenePicker`] is what the dispatcher needs from a scene: a ray test and
//! an annotation lookup that walks up the object hierarchy. [`SceneGraph`]
//! is a small in-memory implementation with sphere and box colliders,
//! suitable for hosts without their own physics and for replay traces.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::Ray;

/// Index of an object in a scene.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ObjectId(pub usize);

/// Bit set of scene layers (bit `n` = layer `n`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Whether `layer` (0..32) is in the mask. Out-of-range layers never are.
    #[must_use]
    pub fn contains(self, layer: u8) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }
}

/// Metadata describing a pickable model part.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationRecord {
    /// Optional stable identifier.
    pub id: String,
    /// Heading shown in the popup.
    pub title: String,
    /// Body text shown in the popup.
    pub description: String,
    /// Icon asset reference; `None` hides the icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Result of a successful ray test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Object whose collider was hit.
    pub object: ObjectId,
    /// Distance along the ray.
    pub distance: f32,
    /// Hit point in the ray's space.
    pub point: Vec3,
}

/// What the pick dispatcher needs from a scene.
pub trait ScenePicker {
    /// Nearest collider hit within `max_distance` on a layer in `mask`.
    fn raycast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit>;

    /// Annotation attached to `object` or its nearest annotated ancestor.
    fn find_annotation(&self, object: ObjectId) -> Option<&AnnotationRecord>;
}

/// Collision shape in model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Collider {
    /// Sphere.
    Sphere {
        /// Center point.
        center: Vec3,
        /// Radius.
        radius: f32,
    },
    /// Axis-aligned box.
    Box {
        /// Minimum corner.
        min: Vec3,
        /// Maximum corner.
        max: Vec3,
    },
}

impl Collider {
    /// Entry distance of `ray` into this shape, if it is hit in front of the
    /// origin. A ray starting inside reports distance 0.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match *self {
            Collider::Sphere { center, radius } => {
                let oc = ray.origin - center;
                let b = oc.dot(ray.direction);
                let c = oc.length_squared() - radius * radius;
                if c <= 0.0 {
                    return Some(0.0);
                }
                let disc = b * b - c;
                if disc < 0.0 {
                    return None;
                }
                let t = -b - disc.sqrt();
                (t >= 0.0).then_some(t)
            }
            Collider::Box { min, max } => {
                let inv = ray.direction.recip();
                let t1 = (min - ray.origin) * inv;
                let t2 = (max - ray.origin) * inv;
                let t_near = t1.min(t2).max_element();
                let t_far = t1.max(t2).min_element();
                if t_near > t_far || t_far < 0.0 || t_near.is_nan() {
                    return None;
                }
                Some(t_near.max(0.0))
            }
        }
    }
}

/// One object in a [`SceneGraph`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneNode {
    /// Display name (for logs).
    pub name: String,
    /// Parent object, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ObjectId>,
    /// Layer index (0..32).
    pub layer: u8,
    /// Collision shape; objects without one are never hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collider: Option<Collider>,
    /// Attached annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<AnnotationRecord>,
}

/// Flat object hierarchy with colliders, in model space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its id.
    pub fn add(&mut self, node: SceneNode) -> ObjectId {
        self.nodes.push(node);
        ObjectId(self.nodes.len() - 1)
    }

    /// Node by id.
    #[must_use]
    pub fn node(&self, id: ObjectId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ScenePicker for SceneGraph {
    fn raycast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| mask.contains(node.layer))
            .filter_map(|(i, node)| {
                let distance = node.collider?.intersect(ray)?;
                (distance <= max_distance).then_some((i, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, distance)| RayHit {
                object: ObjectId(i),
                distance,
                point: ray.at(distance),
            })
    }

    fn find_annotation(&self, object: ObjectId) -> Option<&AnnotationRecord> {
        let mut current = Some(object);
        // Bounded walk so a malformed parent cycle cannot spin forever.
        for _ in 0..=self.nodes.len() {
            let node = self.nodes.get(current?.0)?;
            if let Some(record) = &node.annotation {
                return Some(record);
            }
            current = node.parent;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> AnnotationRecord {
        AnnotationRecord {
            title: title.into(),
            ..AnnotationRecord::default()
        }
    }

    fn down_z() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z)
    }

    #[test]
    fn sphere_hit_distance() {
        let c = Collider::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
        };
        assert!((c.intersect(&down_z()).unwrap() - 9.0).abs() < 1e-5);
        let miss = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(c.intersect(&miss).is_none());
    }

    #[test]
    fn box_hit_distance() {
        let c = Collider::Box {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        assert!((c.intersect(&down_z()).unwrap() - 9.0).abs() < 1e-5);
        let behind = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(c.intersect(&behind).is_none());
    }

    #[test]
    fn nearest_hit_wins_and_mask_filters() {
        let mut scene = SceneGraph::new();
        let far = scene.add(SceneNode {
            collider: Some(Collider::Sphere {
                center: Vec3::new(0.0, 0.0, -5.0),
                radius: 1.0,
            }),
            ..SceneNode::default()
        });
        let near = scene.add(SceneNode {
            layer: 3,
            collider: Some(Collider::Sphere {
                center: Vec3::ZERO,
                radius: 1.0,
            }),
            ..SceneNode::default()
        });

        let hit = scene.raycast(&down_z(), 50.0, LayerMask::ALL).unwrap();
        assert_eq!(hit.object, near);

        let hit = scene.raycast(&down_z(), 50.0, LayerMask(1)).unwrap();
        assert_eq!(hit.object, far);

        assert!(scene.raycast(&down_z(), 5.0, LayerMask::ALL).is_none());
    }

    #[test]
    fn annotation_found_on_ancestor() {
        let mut scene = SceneGraph::new();
        let root = scene.add(SceneNode {
            annotation: Some(record("Engine")),
            ..SceneNode::default()
        });
        let part = scene.add(SceneNode {
            parent: Some(root),
            ..SceneNode::default()
        });
        let bolt = scene.add(SceneNode {
            parent: Some(part),
            ..SceneNode::default()
        });
        assert_eq!(scene.find_annotation(bolt).unwrap().title, "Engine");
    }

    #[test]
    fn no_annotation_anywhere_is_none() {
        let mut scene = SceneGraph::new();
        let a = scene.add(SceneNode::default());
        let b = scene.add(SceneNode {
            parent: Some(a),
            ..SceneNode::default()
        });
        assert!(scene.find_annotation(b).is_none());
        assert!(scene.find_annotation(ObjectId(99)).is_none());
    }

    #[test]
    fn parent_cycle_terminates() {
        let mut scene = SceneGraph::new();
        let a = scene.add(SceneNode {
            parent: Some(ObjectId(1)),
            ..SceneNode::default()
        });
        let _ = scene.add(SceneNode {
            parent: Some(a),
            ..SceneNode::default()
        });
        assert!(scene.find_annotation(a).is_none());
    }

    #[test]
    fn layer_mask_bounds() {
        assert!(LayerMask(0b100).contains(2));
        assert!(!LayerMask(0b100).contains(1));
        assert!(!LayerMask::ALL.contains(40));
    }
}
