//! Scenario tests driving the controller against a collision world

use super::*;
use crate::core::{BallConfig, CourseConfig};
use crate::physics::collision::BoxCollider;
use approx::assert_relative_eq;

const FRAME: f32 = 1.0 / 60.0;

fn ball_config(radius: f32) -> BallConfig {
    BallConfig {
        radius,
        ..BallConfig::default()
    }
}

fn empty_world() -> CollisionWorld {
    let mut world = CollisionWorld::default();
    world.build_index().expect("empty world builds");
    world
}

fn world_with(boxes: &[BoxCollider]) -> CollisionWorld {
    let mut world = CollisionWorld::default();
    for shape in boxes {
        world.insert_static(*shape).expect("insert before build");
    }
    world.build_index().expect("first build");
    world
}

/// Tick with no keys until `done` holds, returning the last report
fn run_until(
    controller: &mut BallController,
    world: &CollisionWorld,
    courses: &CourseSet,
    max_ticks: usize,
    mut done: impl FnMut(&BallController, &TickReport) -> bool,
) -> TickReport {
    for _ in 0..max_ticks {
        let report = controller.tick(KeyState::empty(), FRAME, world, courses);
        if done(controller, &report) {
            return report;
        }
    }
    panic!("condition not reached within {max_ticks} ticks");
}

#[test]
fn test_free_fall_matches_kinematics() {
    let world = empty_world();
    let courses = CourseSet::default();
    let mut controller = BallController::new(ball_config(0.1), Vec3::new(0.0, 5.0, 0.0));
    controller.launch(Vec3::zeros());

    for _ in 0..1000 {
        controller.tick(KeyState::empty(), 0.001, &world, &courses);
    }

    let gravity = controller.config().physics.gravity;
    assert_relative_eq!(controller.velocity().y, -gravity, epsilon = 1e-3);
    assert_relative_eq!(controller.position().y, 5.0 - 0.5 * gravity, epsilon = 0.01);
    assert_relative_eq!(controller.position().x, 0.0);
    assert_eq!(controller.phase(), ShotPhase::Moving);
}

#[test]
fn test_delta_time_is_clamped() {
    let world = empty_world();
    let courses = CourseSet::default();
    let mut slow = BallController::new(ball_config(0.1), Vec3::new(0.0, 5.0, 0.0));
    let mut clamped = slow.clone();
    slow.launch(Vec3::new(1.0, 0.0, 0.0));
    clamped.launch(Vec3::new(1.0, 0.0, 0.0));

    slow.tick(KeyState::empty(), DEFAULT_MAX_FRAME_TIME, &world, &courses);
    clamped.tick(KeyState::empty(), 2.5, &world, &courses);

    assert_relative_eq!(slow.position(), clamped.position(), epsilon = 1e-6);
    assert_relative_eq!(slow.velocity(), clamped.velocity(), epsilon = 1e-6);
}

#[test]
fn test_ball_comes_to_rest_on_box() {
    let world = world_with(&[BoxCollider::axis_aligned(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))]);
    let courses = CourseSet::default();
    let mut controller = BallController::new(ball_config(0.5), Vec3::new(0.0, 3.0, 0.0));
    controller.launch(Vec3::zeros());

    let report = run_until(&mut controller, &world, &courses, 600, |_, report| report.settled);

    assert!(report.contacts > 0);
    assert_eq!(controller.phase(), ShotPhase::Idle);
    assert_relative_eq!(controller.position().y, 1.5, epsilon = 1e-3);
    assert_relative_eq!(controller.velocity(), Vec3::zeros());
    assert_eq!(controller.checkpoint(), controller.position());

    // Stays put while idle
    let rest = controller.position();
    for _ in 0..30 {
        controller.tick(KeyState::empty(), FRAME, &world, &courses);
    }
    assert_relative_eq!(controller.position(), rest, epsilon = 1e-6);
}

#[test]
fn test_wall_bounce_reverses_horizontal_motion() {
    let wall = BoxCollider::axis_aligned(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.5, 5.0, 5.0));
    let world = world_with(&[wall]);
    let courses = CourseSet::default();
    let mut controller = BallController::new(ball_config(0.25), Vec3::new(0.0, 0.0, 0.0));
    controller.launch(Vec3::new(4.0, 0.0, 0.0));

    run_until(&mut controller, &world, &courses, 120, |ball, report| {
        report.contacts > 0 && ball.velocity().x < 0.0
    });

    assert_relative_eq!(controller.velocity().x, -4.0, epsilon = 1e-4);
    assert!(controller.position().x <= 1.25 + 1e-4);
}

#[test]
fn test_goal_advances_to_next_course() {
    let world = empty_world();
    let courses = CourseSet::from_config(&[
        CourseConfig::new([0.0, 0.1, 0.0], [5.0, 0.0, 0.0]),
        CourseConfig::new([20.0, 0.1, 0.0], [25.0, 0.0, 0.0]),
        CourseConfig::new([40.0, 0.1, 0.0], [45.0, 0.0, 0.0]),
    ]);
    let mut controller = BallController::for_courses(ball_config(0.06), &courses);
    assert_eq!(controller.position(), Vec3::new(0.0, 0.1, 0.0));

    controller.start_course(1, &courses);
    controller.place_at(Vec3::new(25.0, 0.05, 0.0));
    let report = controller.tick(KeyState::empty(), FRAME, &world, &courses);

    assert_eq!(report.completed, Some(CourseId(1)));
    assert_eq!(controller.active_course(), 2);
    assert_eq!(controller.position(), Vec3::new(40.0, 0.1, 0.0));
    assert_eq!(controller.checkpoint(), Vec3::new(40.0, 0.1, 0.0));
    assert_eq!(controller.velocity(), Vec3::zeros());
    assert_eq!(controller.phase(), ShotPhase::Idle);

    // Last course wraps to the first
    controller.place_at(Vec3::new(45.0, 0.05, 0.0));
    let report = controller.tick(KeyState::empty(), FRAME, &world, &courses);
    assert_eq!(report.completed, Some(CourseId(2)));
    assert_eq!(controller.active_course(), 0);
    assert_eq!(controller.position(), Vec3::new(0.0, 0.1, 0.0));
}

#[test]
fn test_goal_ignored_while_moving() {
    let world = empty_world();
    let courses = CourseSet::from_config(&[CourseConfig::new([0.0, 0.1, 0.0], [0.0, 0.0, 0.0])]);
    let mut controller = BallController::for_courses(ball_config(0.06), &courses);
    controller.place_at(Vec3::new(0.0, 0.05, 0.0));
    controller.launch(Vec3::new(0.5, 0.0, 0.0));

    let report = controller.tick(KeyState::empty(), FRAME, &world, &courses);
    assert!(report.completed.is_none());
    assert_eq!(controller.phase(), ShotPhase::Moving);
}

#[test]
fn test_out_of_bounds_landing_resets_to_checkpoint() {
    let half = Vec3::new(2.0, 0.5, 2.0);
    let world = world_with(&[
        BoxCollider::axis_aligned(Vec3::zeros(), half).with_tag(CourseId(0)),
        BoxCollider::axis_aligned(Vec3::new(10.0, 0.0, 0.0), half).with_tag(CourseId(1)),
    ]);
    let courses = CourseSet::from_config(&[
        CourseConfig::new([0.0, 2.0, 0.0], [-50.0, 0.0, 0.0]),
        CourseConfig::new([10.0, 2.0, 0.0], [-60.0, 0.0, 0.0]),
    ]);
    let mut controller = BallController::for_courses(ball_config(0.5), &courses);

    // Land on the active course first to record a checkpoint
    controller.launch(Vec3::zeros());
    run_until(&mut controller, &world, &courses, 600, |_, report| report.settled);
    let checkpoint = controller.checkpoint();
    assert_relative_eq!(checkpoint, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-3);

    // Now come to rest on the neighbouring course
    controller.place_at(Vec3::new(10.0, 2.0, 0.0));
    controller.launch(Vec3::zeros());
    let report = run_until(&mut controller, &world, &courses, 600, |_, report| {
        report.reset.is_some()
    });

    assert_eq!(report.reset, Some(ResetReason::OutOfBounds));
    assert!(!report.settled);
    assert_eq!(controller.position(), checkpoint);
    assert_eq!(controller.checkpoint(), checkpoint);
    assert_eq!(controller.velocity(), Vec3::zeros());
    assert_eq!(controller.phase(), ShotPhase::Idle);
    assert_eq!(controller.active_course(), 0);
}

#[test]
fn test_untagged_geometry_is_never_out_of_bounds() {
    let world = world_with(&[BoxCollider::axis_aligned(Vec3::zeros(), Vec3::new(2.0, 0.5, 2.0))]);
    let courses = CourseSet::from_config(&[CourseConfig::new([0.0, 2.0, 0.0], [-50.0, 0.0, 0.0])]);
    let mut controller = BallController::for_courses(ball_config(0.5), &courses);
    controller.launch(Vec3::zeros());

    let report = run_until(&mut controller, &world, &courses, 600, |_, report| {
        report.settled || report.reset.is_some()
    });

    assert!(report.settled);
    assert!(report.reset.is_none());
    assert_relative_eq!(controller.checkpoint().y, 1.0, epsilon = 1e-3);
}

#[test]
fn test_safety_net_catches_falling_ball() {
    let world = empty_world();
    let courses = CourseSet::default();
    let start = Vec3::new(1.0, 0.0, 1.0);
    let mut controller = BallController::new(ball_config(0.06), start);
    controller.launch(Vec3::zeros());

    let report = run_until(&mut controller, &world, &courses, 600, |_, report| {
        report.reset.is_some()
    });

    assert_eq!(report.reset, Some(ResetReason::SafetyNet));
    assert_eq!(controller.position(), start);
    assert_eq!(controller.phase(), ShotPhase::Idle);
}

#[test]
fn test_charge_and_release_launches_along_yaw() {
    let world = empty_world();
    let courses = CourseSet::default();
    let mut controller = BallController::new(ball_config(0.06), Vec3::new(0.0, 1.0, 0.0));
    let yaw = controller.aim().yaw;

    controller.tick(KeyState::CHARGE, FRAME, &world, &courses);
    assert_eq!(controller.phase(), ShotPhase::Aiming);
    assert!(controller.show_reticle());

    for _ in 0..30 {
        controller.tick(KeyState::CHARGE | KeyState::LOOK_UP, FRAME, &world, &courses);
    }
    let power = controller.aim().power;
    assert_relative_eq!(power, 6.0, epsilon = 1e-3);
    assert_relative_eq!(controller.power_ratio(), 0.6, epsilon = 1e-4);
    // Ball does not move while aiming
    assert_eq!(controller.position(), Vec3::new(0.0, 1.0, 0.0));

    controller.tick(KeyState::empty(), FRAME, &world, &courses);
    assert_eq!(controller.phase(), ShotPhase::Moving);
    assert_relative_eq!(controller.aim().power, 0.0);
    assert_relative_eq!(controller.aim().yaw, yaw);

    let horizontal = Vec3::new(controller.velocity().x, 0.0, controller.velocity().z);
    assert_relative_eq!(horizontal, utils::yaw_direction(yaw) * power, epsilon = 1e-4);
}

#[test]
fn test_power_is_clamped() {
    let mut controller = BallController::new(ball_config(0.06), Vec3::zeros());
    controller.update(KeyState::CHARGE, FRAME);
    for _ in 0..200 {
        controller.update(KeyState::CHARGE | KeyState::LOOK_UP, FRAME);
    }
    assert_relative_eq!(controller.aim().power, controller.config().aim.max_power);

    for _ in 0..200 {
        controller.update(KeyState::CHARGE | KeyState::LOOK_DOWN, FRAME);
    }
    assert_relative_eq!(controller.aim().power, 0.0);
}

#[test]
fn test_aim_rotation_limits() {
    let mut controller = BallController::new(ball_config(0.06), Vec3::zeros());
    for _ in 0..600 {
        controller.update(KeyState::LOOK_UP | KeyState::LOOK_LEFT, FRAME);
    }

    let aim = controller.aim();
    let limit = controller.config().aim.pitch_limit;
    assert_relative_eq!(aim.pitch, limit);
    assert!(aim.yaw >= 0.0 && aim.yaw < std::f32::consts::TAU);
}

#[test]
fn test_free_camera_keeps_simulating_without_input() {
    let world = empty_world();
    let courses = CourseSet::default();
    let mut controller = BallController::new(ball_config(0.06), Vec3::new(0.0, 1.0, 0.0));

    controller.tick(KeyState::TOGGLE_CAMERA, FRAME, &world, &courses);
    assert_eq!(controller.camera_mode(), CameraMode::Free);

    // Holding the toggle does not flip back, and charge is ignored
    controller.tick(KeyState::TOGGLE_CAMERA | KeyState::CHARGE, FRAME, &world, &courses);
    assert_eq!(controller.camera_mode(), CameraMode::Free);
    assert_eq!(controller.phase(), ShotPhase::Idle);

    controller.launch(Vec3::new(1.0, 0.0, 0.0));
    let before = controller.position();
    controller.tick(KeyState::empty(), FRAME, &world, &courses);
    assert!(controller.position().x > before.x);

    controller.tick(KeyState::TOGGLE_CAMERA, FRAME, &world, &courses);
    assert_eq!(controller.camera_mode(), CameraMode::Attached);
}
