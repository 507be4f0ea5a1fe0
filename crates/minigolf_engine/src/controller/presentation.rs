//! Derived poses for rendering
//!
//! Nothing here feeds back into the simulation. A renderer reads the
//! [`Presentation`] after each tick and places the ball mesh, the orbit
//! camera and the shot indicators from it.

use super::{AimState, BallController};
use crate::controller::input::{CameraMode, ShotPhase};
use crate::foundation::math::{utils, Vec3};

/// Translation, euler rotation (XYZ, radians) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World position
    pub translation: Vec3,
    /// Euler angles in radians
    pub rotation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Pose {
    /// Unrotated, unit-scale pose at `translation`
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Vec3::zeros(),
            scale: Vec3::repeat(1.0),
        }
    }
}

/// Orbit camera placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// Camera position
    pub eye: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    /// Ball mesh pose; scale is the ball radius
    pub ball: Pose,
    /// Orbit camera, `None` while the free camera is active
    pub camera: Option<CameraRig>,
    /// Aim reticle, shown only while aiming
    pub aim_indicator: Option<Pose>,
    /// Power bar, shown only while aiming
    pub power_indicator: Option<Pose>,
}

/// Viewing direction of the orbit camera.
///
/// Positive pitch looks down onto the ball.
pub fn view_direction(aim: &AimState) -> Vec3 {
    let (sin_pitch, cos_pitch) = aim.pitch.sin_cos();
    Vec3::new(aim.yaw.sin() * cos_pitch, -sin_pitch, aim.yaw.cos() * cos_pitch)
}

/// Derive the frame's poses from the controller
pub fn present(controller: &BallController) -> Presentation {
    let rig = &controller.config().camera;
    let aim = controller.aim();
    let position = controller.position();

    let mut ball = Pose::at(position);
    ball.scale = Vec3::repeat(controller.config().radius);

    let camera = match controller.camera_mode() {
        CameraMode::Attached => Some(CameraRig {
            eye: position - view_direction(aim) * rig.distance,
            target: position,
        }),
        CameraMode::Free => None,
    };

    let (aim_indicator, power_indicator) = if controller.phase() == ShotPhase::Aiming {
        let heading = Vec3::new(0.0, aim.yaw, 0.0);
        let reticle = Pose {
            rotation: heading,
            ..Pose::at(position)
        };
        let power = Pose {
            translation: position + utils::yaw_direction(aim.yaw) * rig.power_indicator_offset,
            rotation: heading,
            scale: Vec3::new(1.0, 1.0, controller.power_ratio() * rig.power_indicator_length),
        };
        (Some(reticle), Some(power))
    } else {
        (None, None)
    };

    Presentation {
        ball,
        camera,
        aim_indicator,
        power_indicator,
    }
}
