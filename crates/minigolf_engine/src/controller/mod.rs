//! Ball controller
//!
//! Owns the ball's kinematic state and drives it through the shot cycle:
//!
//! ```text
//! Idle --charge held--> Aiming --charge released--> Moving --settled--> Idle
//! ```
//!
//! The camera mode is an orthogonal toggle. While the free camera is
//! active no ball input is consumed, but the ball keeps simulating.
//!
//! # Module Organization
//!
//! - [`input`] - Key state decoding into intents
//! - [`physics`] - Pure integration and contact response
//! - [`course`] - Tees, goal volumes and course order
//! - [`presentation`] - Ball, camera and indicator poses for rendering

pub mod course;
pub mod input;
pub mod physics;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use course::{Course, CourseSet};
pub use input::{decode_intents, CameraMode, Intents, KeyState, ShotPhase};
pub use physics::{ContactOutcome, KinematicState};
pub use presentation::{present, CameraRig, Pose, Presentation};

use crate::core::BallConfig;
use crate::foundation::math::{utils, Vec2, Vec3};
use crate::foundation::time::{self, DEFAULT_MAX_FRAME_TIME};
use crate::physics::collision::{Collision, CourseId, SphereCollider};
use crate::physics::CollisionWorld;

/// Aim pivot and charged power
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimState {
    /// Heading around +Y in `[0, 2π)`; 0 faces +Z
    pub yaw: f32,
    /// Camera tilt; positive looks down
    pub pitch: f32,
    /// Launch speed accumulated while aiming
    pub power: f32,
}

/// Why the ball was put back on its checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// Came to rest on another course's geometry
    OutOfBounds,
    /// Left the playable height range
    SafetyNet,
}

/// Events of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Contacts reported by the collision world
    pub contacts: usize,
    /// The ball came to rest on its own course
    pub settled: bool,
    /// The ball was moved back to its checkpoint
    pub reset: Option<ResetReason>,
    /// Course whose goal was reached; the ball is now on the next tee
    pub completed: Option<CourseId>,
}

/// The player's ball
#[derive(Debug, Clone)]
pub struct BallController {
    config: BallConfig,
    state: KinematicState,
    phase: ShotPhase,
    camera: CameraMode,
    aim: AimState,
    previous_keys: KeyState,
    checkpoint: Vec3,
    active_course: usize,
    max_frame_time: f32,
}

impl BallController {
    /// Ball at rest at `start`, which is also its first checkpoint
    pub fn new(config: BallConfig, start: Vec3) -> Self {
        let aim = AimState {
            yaw: utils::wrap_angle(config.aim.initial_yaw),
            pitch: config.aim.initial_pitch,
            power: 0.0,
        };
        Self {
            config,
            state: KinematicState::at_rest(start),
            phase: ShotPhase::Idle,
            camera: CameraMode::Attached,
            aim,
            previous_keys: KeyState::empty(),
            checkpoint: start,
            active_course: 0,
            max_frame_time: DEFAULT_MAX_FRAME_TIME,
        }
    }

    /// Ball on the tee of the first course
    pub fn for_courses(config: BallConfig, courses: &CourseSet) -> Self {
        let start = courses.get(0).map_or_else(Vec3::zeros, |course| course.tee);
        Self::new(config, start)
    }

    /// Override the frame time clamp
    pub fn with_max_frame_time(mut self, max_frame_time: f32) -> Self {
        self.max_frame_time = max_frame_time;
        self
    }

    /// Ball configuration
    pub fn config(&self) -> &BallConfig {
        &self.config
    }

    /// Kinematic state
    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// Ball center
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    /// Ball velocity
    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    /// Whether the last contact response grounded the ball
    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    /// Current shot phase
    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    /// Current camera mode
    pub fn camera_mode(&self) -> CameraMode {
        self.camera
    }

    /// Aim pivot and power
    pub fn aim(&self) -> &AimState {
        &self.aim
    }

    /// Last safe resting position
    pub fn checkpoint(&self) -> Vec3 {
        self.checkpoint
    }

    /// Index of the course being played
    pub fn active_course(&self) -> usize {
        self.active_course
    }

    /// Charged power as a fraction of the maximum
    pub fn power_ratio(&self) -> f32 {
        if self.config.aim.max_power > 0.0 {
            self.aim.power / self.config.aim.max_power
        } else {
            0.0
        }
    }

    /// Whether the aim reticle should be drawn
    pub fn show_reticle(&self) -> bool {
        self.phase == ShotPhase::Aiming
    }

    /// Collision probe at the ball's current position
    pub fn probe(&self) -> SphereCollider {
        SphereCollider::new(self.state.position, self.config.radius)
    }

    /// Teleport the ball and bring it to rest
    pub fn place_at(&mut self, position: Vec3) {
        self.state = KinematicState::at_rest(position);
        self.aim.power = 0.0;
        self.phase = ShotPhase::Idle;
    }

    /// Move the ball back to its last checkpoint
    pub fn reset_to_checkpoint(&mut self) {
        log::debug!("Resetting ball to checkpoint {:?}", self.checkpoint);
        self.place_at(self.checkpoint);
    }

    /// Put the ball on the tee of course `index`
    pub fn start_course(&mut self, index: usize, courses: &CourseSet) {
        let Some(course) = courses.get(index) else {
            log::warn!("No course {} in a set of {}", index, courses.len());
            return;
        };
        self.active_course = index;
        self.checkpoint = course.tee;
        self.place_at(course.tee);
        log::info!("Starting {}", course.tag);
    }

    /// Start moving with `velocity`
    pub fn launch(&mut self, velocity: Vec3) {
        log::debug!("Launching ball at {:.2} units/s", velocity.magnitude());
        self.state.velocity = velocity;
        self.aim.power = 0.0;
        self.phase = ShotPhase::Moving;
    }

    /// Consume this frame's keys and integrate motion.
    ///
    /// `delta_time` is used as given; [`BallController::tick`] clamps it.
    pub fn update(&mut self, keys: KeyState, delta_time: f32) {
        let intents = decode_intents(self.phase, self.camera, keys, self.previous_keys);
        self.previous_keys = keys;

        if intents.toggle_camera {
            self.camera = self.camera.toggled();
            log::debug!("Camera mode: {:?}", self.camera);
        }

        self.rotate_aim(&intents, delta_time);

        match self.phase {
            ShotPhase::Idle if intents.begin_charge => {
                self.phase = ShotPhase::Aiming;
            }
            ShotPhase::Aiming => {
                let aim = &self.config.aim;
                self.aim.power = (self.aim.power + intents.power_input * aim.power_rate * delta_time)
                    .clamp(0.0, aim.max_power);
                if intents.release_charge {
                    self.launch(utils::yaw_direction(self.aim.yaw) * self.aim.power);
                }
            }
            _ => {}
        }

        if self.phase == ShotPhase::Moving {
            self.state = physics::integrate(self.state, &self.config.physics, delta_time);
        }
    }

    fn rotate_aim(&mut self, intents: &Intents, delta_time: f32) {
        let input = Vec2::new(intents.pitch_input, intents.yaw_input);
        if let Some(direction) = input.try_normalize(f32::EPSILON) {
            let step = direction * self.config.aim.look_speed * delta_time;
            self.aim.pitch += step.x;
            self.aim.yaw += step.y;
        }

        let limit = self.config.aim.pitch_limit;
        self.aim.pitch = self.aim.pitch.clamp(-limit, limit);
        self.aim.yaw = utils::wrap_angle(self.aim.yaw);
    }

    /// Respond to one contact.
    ///
    /// Returns the reset reason when the ball settled out of bounds.
    pub fn handle_collision(&mut self, collision: &Collision) -> Option<ResetReason> {
        let (state, outcome) = physics::resolve_contact(self.state, collision, &self.config.physics);
        self.state = state;

        let settled = matches!(outcome, ContactOutcome::Landed { settled: true });
        if !settled || self.phase != ShotPhase::Moving {
            return None;
        }

        self.state.velocity = Vec3::zeros();
        self.phase = ShotPhase::Idle;

        match collision.tag {
            Some(tag) if tag != CourseId(self.active_course) => {
                log::info!("Ball left the course onto {}", tag);
                self.reset_to_checkpoint();
                Some(ResetReason::OutOfBounds)
            }
            _ => {
                self.checkpoint = self.state.position;
                log::debug!("Ball settled; checkpoint {:?}", self.checkpoint);
                None
            }
        }
    }

    /// Run one frame: input, integration, collision response, safety net
    /// and goal check.
    pub fn tick(
        &mut self,
        keys: KeyState,
        delta_time: f32,
        world: &CollisionWorld,
        courses: &CourseSet,
    ) -> TickReport {
        let delta_time = time::clamp_delta(delta_time, self.max_frame_time);
        self.update(keys, delta_time);

        let probe = self.probe();
        let was_moving = self.phase == ShotPhase::Moving;
        let mut reset = None;
        let contacts = world.query(&probe, |collision| {
            // Contacts after a reset belong to the old position
            if reset.is_none() {
                reset = self.handle_collision(&collision);
            }
        });

        let mut report = TickReport {
            contacts,
            settled: was_moving && self.phase == ShotPhase::Idle && reset.is_none(),
            reset,
            completed: None,
        };

        if self.state.position.y.abs() > self.config.physics.reset_height {
            log::warn!("Ball fell out of the world at {:?}", self.state.position);
            self.reset_to_checkpoint();
            report.reset = Some(ResetReason::SafetyNet);
        }

        if self.phase != ShotPhase::Moving && courses.goal_contains(self.active_course, &self.probe()) {
            report.completed = Some(CourseId(self.active_course));
            log::info!("Completed {}", CourseId(self.active_course));
            self.start_course(courses.next_index(self.active_course), courses);
        }

        report
    }
}
