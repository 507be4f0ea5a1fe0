//! Scripted golfer
//!
//! Produces one key state per frame, the way a player at the keyboard
//! would: turn toward the cup, hold charge while raising power, release.

use minigolf_engine::controller::{BallController, CourseSet, KeyState, ShotPhase};
use minigolf_engine::foundation::math::constants::{PI, TAU};

/// Golfer aiming straight at the active course's cup
#[derive(Debug, Default)]
pub struct Autoplayer {
    charge_frames: u32,
    strokes: u32,
}

/// Signed shortest rotation from `from` to `to`, in `(-π, π]`
fn angle_between(from: f32, to: f32) -> f32 {
    let diff = (to - from).rem_euclid(TAU);
    if diff > PI {
        diff - TAU
    } else {
        diff
    }
}

impl Autoplayer {
    /// Strokes played on the current course
    pub fn strokes(&self) -> u32 {
        self.strokes
    }

    /// Start counting for a new course
    pub fn reset_strokes(&mut self) {
        self.strokes = 0;
        self.charge_frames = 0;
    }

    /// Keys to hold this frame
    pub fn next_keys(&mut self, ball: &BallController, courses: &CourseSet, frame_time: f32) -> KeyState {
        match ball.phase() {
            ShotPhase::Moving => KeyState::empty(),
            ShotPhase::Aiming => {
                if self.charge_frames > 0 {
                    self.charge_frames -= 1;
                    KeyState::CHARGE | KeyState::LOOK_UP
                } else {
                    self.strokes += 1;
                    log::debug!("Stroke {} released at power {:.2}", self.strokes, ball.aim().power);
                    KeyState::empty()
                }
            }
            ShotPhase::Idle => self.line_up(ball, courses, frame_time),
        }
    }

    fn line_up(&mut self, ball: &BallController, courses: &CourseSet, frame_time: f32) -> KeyState {
        let Some(course) = courses.get(ball.active_course()) else {
            return KeyState::empty();
        };

        let to_cup = course.goal.position - ball.position();
        let target_yaw = to_cup.x.atan2(to_cup.z);
        let turn = angle_between(ball.aim().yaw, target_yaw);

        let config = ball.config();
        let step = config.aim.look_speed * frame_time;
        if turn.abs() > step * 0.5 {
            return if turn > 0.0 {
                KeyState::LOOK_RIGHT
            } else {
                KeyState::LOOK_LEFT
            };
        }

        // Grounded speed decays exponentially; the ball stops at stop_speed
        let distance = (to_cup.x * to_cup.x + to_cup.z * to_cup.z).sqrt();
        let damping = config.physics.drag + config.physics.friction;
        let launch_speed = (distance * damping + config.physics.stop_speed).min(config.aim.max_power);
        let per_frame = config.aim.power_rate * frame_time;

        self.charge_frames = if per_frame > 0.0 {
            (launch_speed / per_frame).round().max(1.0) as u32
        } else {
            0
        };
        log::debug!(
            "Lining up: {:.2} units to the cup, launch speed {:.2}",
            distance,
            launch_speed
        );
        KeyState::CHARGE
    }
}
