//! Tap picking against model colliders.
//!
//! A confirmed tap is turned into a camera ray, tested against the scene,
//! and resolved to the [`AnnotationRecord`] on the hit object or its nearest
//! annotated ancestor.

mod dispatcher;
mod scene;

pub use dispatcher::PickDispatcher;
pub use scene::{
    AnnotationRecord, Collider, LayerMask, ObjectId, RayHit, SceneGraph, SceneNode,
    ScenePicker,
};
