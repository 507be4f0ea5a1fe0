//! Oriented box collider
//!
//! Boxes are described by three mutually orthogonal axes, each a unit normal
//! plus a half-length, around a center. They make up the static level
//! geometry and the goal trigger volumes.

use super::{Aabb, Collider, Collision, CourseId};
use crate::foundation::math::{utils, Vec2, Vec3};

/// One local axis of an oriented box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxAxis {
    /// Unit direction, or zero for a degenerate axis
    pub normal: Vec3,
    /// Half the box extent along `normal` (non-negative)
    pub half_length: f32,
}

impl BoxAxis {
    /// Axis with no extent
    pub const DEGENERATE: Self = Self {
        normal: Vec3::new(0.0, 0.0, 0.0),
        half_length: 0.0,
    };

    /// Build an axis from a vector whose length is the half-extent
    pub fn from_vector(axis: Vec3) -> Self {
        match utils::try_normalize(&axis) {
            Some(normal) => Self {
                normal,
                half_length: axis.magnitude(),
            },
            None => Self::DEGENERATE,
        }
    }

    /// Build an axis from a direction and an explicit half-length
    pub fn new(direction: Vec3, half_length: f32) -> Self {
        match utils::try_normalize(&direction) {
            Some(normal) if half_length > 0.0 => Self { normal, half_length },
            _ => Self::DEGENERATE,
        }
    }

    /// Whether the axis has no usable direction
    pub fn is_degenerate(&self) -> bool {
        self.half_length <= 0.0
    }

    /// Half-width of this axis' contribution along `direction`
    fn extent_along(&self, direction: &Vec3) -> f32 {
        self.normal.dot(direction).abs() * self.half_length
    }
}

/// Oriented box with an optional owner tag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    /// World-space center
    pub position: Vec3,
    axes: [BoxAxis; 3],
    tag: Option<CourseId>,
}

impl BoxCollider {
    /// Create a box from a center and three axes
    pub fn new(position: Vec3, axes: [BoxAxis; 3]) -> Self {
        Self {
            position,
            axes,
            tag: None,
        }
    }

    /// Create a box from a center and three axis vectors.
    ///
    /// Each vector's length is the half-extent along it.
    pub fn from_axes(position: Vec3, axes: [Vec3; 3]) -> Self {
        Self::new(position, axes.map(BoxAxis::from_vector))
    }

    /// Create a box from `(direction, half_length)` pairs
    pub fn from_normals(position: Vec3, axes: [(Vec3, f32); 3]) -> Self {
        Self::new(
            position,
            axes.map(|(direction, half_length)| BoxAxis::new(direction, half_length)),
        )
    }

    /// Create a box aligned with the world axes
    pub fn axis_aligned(position: Vec3, half_extents: Vec3) -> Self {
        Self::from_normals(
            position,
            [
                (Vec3::x(), half_extents.x.abs()),
                (Vec3::y(), half_extents.y.abs()),
                (Vec3::z(), half_extents.z.abs()),
            ],
        )
    }

    /// Attach an owner tag
    pub fn with_tag(mut self, tag: CourseId) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Replace the owner tag
    pub fn set_tag(&mut self, tag: Option<CourseId>) {
        self.tag = tag;
    }

    /// The three local axes
    pub fn axes(&self) -> &[BoxAxis; 3] {
        &self.axes
    }

    /// Whether `other` is separated from this box along `axis`
    fn separated_along(&self, delta: &Vec3, axis: &BoxAxis, other: &dyn Collider) -> bool {
        delta.dot(&axis.normal).abs() > axis.half_length + other.projected_extent(&axis.normal)
    }
}

/// Index of the face to push out through when a point lies inside the box.
///
/// The smallest margin wins; ties fall through to the later axis.
fn push_out_axis(margins: &[f32; 3]) -> usize {
    if margins[0] < margins[1] && margins[0] < margins[2] {
        0
    } else if margins[1] < margins[0] && margins[1] < margins[2] {
        1
    } else {
        2
    }
}

impl Collider for BoxCollider {
    fn position(&self) -> Vec3 {
        self.position
    }

    /// Separating-axis test over this box's own three axes.
    ///
    /// Cross-product axes are not tested, so two boxes may report a
    /// false positive. [`Collider::compute_impulse`] settles that.
    fn collides_with(&self, other: &dyn Collider) -> bool {
        let delta = other.position() - self.position;
        !self
            .axes
            .iter()
            .any(|axis| self.separated_along(&delta, axis, other))
    }

    fn projected_extent(&self, direction: &Vec3) -> f32 {
        self.axes.iter().map(|axis| axis.extent_along(direction)).sum()
    }

    fn bounding_radius(&self) -> f32 {
        self.axes
            .iter()
            .map(|axis| axis.half_length * axis.half_length)
            .sum::<f32>()
            .sqrt()
    }

    fn aabb(&self) -> Aabb {
        let half_extents = self.axes.iter().fold(Vec2::zeros(), |acc, axis| {
            acc + Vec2::new(axis.normal.x.abs(), axis.normal.z.abs()) * axis.half_length
        });
        Aabb::from_center_half_extents(utils::horizontal(&self.position), half_extents)
    }

    /// Closest-point penetration test against `other`.
    ///
    /// The other shape's center is expressed in box coordinates and clamped
    /// onto the box. When the center is already inside, the point is pushed
    /// to the nearest face instead and the normal is flipped.
    fn compute_impulse(&self, other: &dyn Collider) -> Option<Collision> {
        let delta = other.position() - self.position;
        let local = self.axes.map(|axis| delta.dot(&axis.normal));

        let mut closest = [0.0_f32; 3];
        for ((point, coordinate), axis) in closest.iter_mut().zip(local).zip(&self.axes) {
            *point = coordinate.clamp(-axis.half_length, axis.half_length);
        }

        let inside = local
            .iter()
            .zip(&self.axes)
            .all(|(coordinate, axis)| coordinate.abs() <= axis.half_length);

        if inside {
            let margins = [0, 1, 2].map(|i| {
                let axis = &self.axes[i];
                if axis.is_degenerate() {
                    f32::INFINITY
                } else {
                    axis.half_length - closest[i].abs()
                }
            });
            let face = push_out_axis(&margins);
            let half_length = self.axes[face].half_length;
            closest[face] = if closest[face] > 0.0 { half_length } else { -half_length };
        }

        let offset: Vec3 = self
            .axes
            .iter()
            .zip(local.iter().zip(&closest))
            .map(|(axis, (coordinate, point))| axis.normal * (coordinate - point))
            .sum();

        let distance = offset.magnitude();
        let direction = utils::try_normalize(&offset)?;
        let extent = other.projected_extent(&direction);

        if !inside && distance > extent {
            return None;
        }

        Some(Collision {
            normal: if inside { -direction } else { direction },
            depth: (extent - distance).max(0.0),
            tag: self.tag,
        })
    }

    fn tag(&self) -> Option<CourseId> {
        self.tag
    }
}
