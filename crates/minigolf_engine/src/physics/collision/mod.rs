//! Collision primitives shared by the broad and narrow phase
//!
//! Every shape implements the [`Collider`] capability. Only two shapes exist:
//! oriented boxes for static level geometry and spheres for the ball. The
//! narrow phase is deliberately one-directional: static shapes author the
//! [`Collision`] record, the dynamic sphere never does.
//!
//! # Module Organization
//!
//! - [`aabb`] - Horizontal bounds used by the broad phase
//! - [`box_collider`] - Oriented box (level geometry, goal volumes)
//! - [`sphere_collider`] - Sphere probe (the ball)
//! - [`shape`] - Closed union over the two shapes for arena storage

pub mod aabb;
pub mod box_collider;
pub mod sphere_collider;
pub mod shape;

pub use aabb::Aabb;
pub use box_collider::{BoxAxis, BoxCollider};
pub use shape::ColliderShape;
pub use sphere_collider::SphereCollider;

use crate::foundation::math::Vec3;

/// Identifies the course (hole) a piece of geometry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseId(pub usize);

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "course {}", self.0 + 1)
    }
}

/// Contact produced by the narrow phase.
///
/// Lives for a single callback invocation and is never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Unit normal pointing from the obstacle toward the dynamic body
    pub normal: Vec3,
    /// Distance along `normal` needed to separate the shapes (non-negative)
    pub depth: f32,
    /// Owner tag of the static shape that was hit
    pub tag: Option<CourseId>,
}

/// Operations every collision shape supports
pub trait Collider {
    /// World-space center
    fn position(&self) -> Vec3;

    /// Cheap overlap predicate, evaluated before the narrow phase
    fn collides_with(&self, other: &dyn Collider) -> bool;

    /// Half-width of the shape along `direction`.
    ///
    /// `direction` need not be unit length; the result is only a distance
    /// when the caller normalized it first.
    fn projected_extent(&self, direction: &Vec3) -> f32;

    /// Radius of a sphere around [`Collider::position`] enclosing the shape
    fn bounding_radius(&self) -> f32;

    /// Conservative horizontal bounds
    fn aabb(&self) -> Aabb;

    /// Authoritative penetration test.
    ///
    /// Returns `None` when the shapes do not actually penetrate.
    fn compute_impulse(&self, other: &dyn Collider) -> Option<Collision>;

    /// Owner tag, if the shape belongs to a course
    fn tag(&self) -> Option<CourseId> {
        None
    }
}
