//! Physics module for collision detection
//!
//! Provides oriented-box and sphere colliders, a text descriptor format for
//! static level geometry, and the [`CollisionWorld`] that answers per-frame
//! contact queries through a quad-tree broad phase.

pub mod collision;
pub mod collision_world;
pub mod descriptor;

pub use collision::{
    Aabb,
    BoxAxis,
    BoxCollider,
    Collider,
    ColliderShape,
    Collision,
    CourseId,
    SphereCollider,
};
pub use collision_world::{CollisionError, CollisionWorld};
pub use descriptor::DescriptorError;
