//! Closed set of collision shapes
//!
//! The collision arena stores shapes by value, so the two concrete shapes
//! are wrapped in an enum rather than boxed trait objects.

use super::{Aabb, BoxCollider, Collider, Collision, CourseId, SphereCollider};
use crate::foundation::math::Vec3;

/// Any shape the collision world can store
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Oriented box
    Box(BoxCollider),
    /// Sphere
    Sphere(SphereCollider),
}

impl ColliderShape {
    /// Borrow the shape through the collider capability
    pub fn as_collider(&self) -> &dyn Collider {
        match self {
            Self::Box(shape) => shape,
            Self::Sphere(shape) => shape,
        }
    }

    /// The box, if this shape is one
    pub fn as_box(&self) -> Option<&BoxCollider> {
        match self {
            Self::Box(shape) => Some(shape),
            Self::Sphere(_) => None,
        }
    }
}

impl From<BoxCollider> for ColliderShape {
    fn from(shape: BoxCollider) -> Self {
        Self::Box(shape)
    }
}

impl From<SphereCollider> for ColliderShape {
    fn from(shape: SphereCollider) -> Self {
        Self::Sphere(shape)
    }
}

impl Collider for ColliderShape {
    fn position(&self) -> Vec3 {
        self.as_collider().position()
    }

    fn collides_with(&self, other: &dyn Collider) -> bool {
        self.as_collider().collides_with(other)
    }

    fn projected_extent(&self, direction: &Vec3) -> f32 {
        self.as_collider().projected_extent(direction)
    }

    fn bounding_radius(&self) -> f32 {
        self.as_collider().bounding_radius()
    }

    fn aabb(&self) -> Aabb {
        self.as_collider().aabb()
    }

    fn compute_impulse(&self, other: &dyn Collider) -> Option<Collision> {
        self.as_collider().compute_impulse(other)
    }

    fn tag(&self) -> Option<CourseId> {
        self.as_collider().tag()
    }
}
