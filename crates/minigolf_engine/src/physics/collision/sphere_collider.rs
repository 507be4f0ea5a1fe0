//! Sphere collider used as the ball probe

use super::{Aabb, Collider, Collision};
use crate::foundation::math::{utils, Vec2, Vec3};

/// Sphere with a center and radius.
///
/// Spheres only ever act as the dynamic side of a query; they never author
/// a [`Collision`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereCollider {
    /// World-space center
    pub position: Vec3,
    /// Radius (non-negative)
    pub radius: f32,
}

impl SphereCollider {
    /// Create a new sphere
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            radius: radius.abs(),
        }
    }
}

impl Collider for SphereCollider {
    fn position(&self) -> Vec3 {
        self.position
    }

    /// Bounding-sphere overlap test, inclusive at touching distance
    fn collides_with(&self, other: &dyn Collider) -> bool {
        let reach = self.radius + other.bounding_radius();
        (other.position() - self.position).magnitude_squared() <= reach * reach
    }

    fn projected_extent(&self, _direction: &Vec3) -> f32 {
        self.radius
    }

    fn bounding_radius(&self) -> f32 {
        self.radius
    }

    fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(
            utils::horizontal(&self.position),
            Vec2::new(self.radius, self.radius),
        )
    }

    fn compute_impulse(&self, _other: &dyn Collider) -> Option<Collision> {
        None
    }
}
