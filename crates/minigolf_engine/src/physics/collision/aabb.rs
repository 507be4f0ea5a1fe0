//! Horizontal axis-aligned bounding rectangles
//!
//! Level geometry is mostly flat, so bounds only cover the two horizontal
//! axes. `x` holds world X and `y` holds world Z.

use crate::foundation::math::Vec2;

/// Axis-aligned bounds on the horizontal (X/Z) plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Aabb {
    /// Create bounds from two corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y, "Aabb min must not exceed max");
        Self { min, max }
    }

    /// Create bounds from a center and (non-negative) half extents
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Full width (x) and depth (y)
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Inclusive overlap test
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Whether `other` lies entirely within these bounds
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_inclusive() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let touching = Aabb::new(Vec2::new(1.0, 0.5), Vec2::new(2.0, 2.0));
        let apart = Aabb::new(Vec2::new(1.1, 0.0), Vec2::new(2.0, 1.0));

        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_center_half_extents() {
        let a = Aabb::from_center_half_extents(Vec2::new(2.0, -1.0), Vec2::new(-1.0, 0.5));
        assert_eq!(a.min, Vec2::new(1.0, -1.5));
        assert_eq!(a.max, Vec2::new(3.0, -0.5));
        assert_eq!(a.center(), Vec2::new(2.0, -1.0));
        assert_eq!(a.size(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_contains() {
        let outer = Aabb::new(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));
        let inner = Aabb::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }
}
