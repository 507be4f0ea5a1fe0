//! Math utilities and types
//!
//! Provides the fundamental math types used by the collision and ball
//! control code. The world is right-handed and Y-up; the two horizontal
//! axes are X and Z.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type, used for the horizontal (X/Z) plane
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2, Vec3};

    /// Project a world position onto the horizontal partitioning plane.
    ///
    /// The returned vector holds `(x, z)`.
    pub fn horizontal(v: &Vec3) -> Vec2 {
        Vec2::new(v.x, v.z)
    }

    /// Normalize a vector, returning `None` for (near) zero-length input
    pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
        v.try_normalize(f32::EPSILON)
    }

    /// Wrap an angle into `[0, 2π)`
    pub fn wrap_angle(angle: f32) -> f32 {
        let wrapped = angle.rem_euclid(constants::TAU);
        // rem_euclid can round up to TAU for tiny negative inputs
        if wrapped >= constants::TAU {
            0.0
        } else {
            wrapped
        }
    }

    /// Unit direction in the horizontal plane for a yaw angle.
    ///
    /// Yaw 0 faces +Z, yaw π/2 faces +X.
    pub fn yaw_direction(yaw: f32) -> Vec3 {
        Vec3::new(yaw.sin(), 0.0, yaw.cos())
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}
