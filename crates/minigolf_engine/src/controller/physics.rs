//! Ball integration and contact response
//!
//! Pure functions over [`KinematicState`]. They know nothing about shot
//! phases or courses; the controller interprets the returned
//! [`ContactOutcome`].

use crate::core::BallPhysicsConfig;
use crate::foundation::math::Vec3;
use crate::physics::Collision;

/// Position, velocity and ground contact of the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    /// Center of the ball
    pub position: Vec3,
    /// Linear velocity in units per second
    pub velocity: Vec3,
    /// Whether a floor-like contact happened since the last integration
    pub grounded: bool,
}

impl KinematicState {
    /// Ball at rest at `position`
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::zeros(),
            grounded: false,
        }
    }

    /// Current speed
    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }
}

/// What a single contact meant for the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    /// Wall or slope hit
    Deflected,
    /// Floor hit; `settled` when the remaining speed is below the stop speed
    Landed { settled: bool },
}

/// Advance one time step.
///
/// Drag and rolling friction only apply when the ball was on the ground
/// at the end of the previous step. Ground contact is cleared here and
/// re-established by [`resolve_contact`].
pub fn integrate(mut state: KinematicState, config: &BallPhysicsConfig, delta_time: f32) -> KinematicState {
    if state.grounded {
        let damping = config.drag + config.friction;
        state.velocity *= (1.0 - damping * delta_time).max(0.0);
    }
    state.grounded = false;

    state.velocity.y -= config.gravity * delta_time;
    state.position += state.velocity * delta_time;
    state
}

/// Push the ball out of an obstacle and reflect its velocity.
///
/// Restitution is measured as a multiple of the incoming normal speed:
/// 1.0 kills it, 2.0 reflects it completely.
pub fn resolve_contact(
    mut state: KinematicState,
    collision: &Collision,
    config: &BallPhysicsConfig,
) -> (KinematicState, ContactOutcome) {
    let normal = collision.normal;
    state.position += normal * collision.depth;

    let restitution = if normal.y >= config.floor_normal_y {
        config.floor_restitution
    } else {
        config.wall_restitution
    };
    let impulse = state.velocity.dot(&normal) * restitution;
    state.velocity -= normal * impulse;

    if normal.y >= config.ground_normal_y {
        state.grounded = true;
        let settled = state.speed() < config.stop_speed;
        (state, ContactOutcome::Landed { settled })
    } else {
        (state, ContactOutcome::Deflected)
    }
}
