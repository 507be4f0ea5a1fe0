//! # Game Configuration
//!
//! All tunables of the collision world, the ball controller and the course
//! layout live here. Defaults reproduce the shipped minigolf course; files in
//! TOML or RON can override any subset of them.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging and frame timing
//! - **World Config**: broad-phase bounds and quad-tree limits
//! - **Ball Config**: probe radius, physics constants, aiming and camera rig
//! - **Course Config**: tee, goal volume and collider file per hole

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::{Vec2, Vec3};
use crate::foundation::time::DEFAULT_MAX_FRAME_TIME;

/// # Engine Configuration
///
/// Core behaviour shared by every subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter, used when `RUST_LOG` is unset
    pub log_level: String,
    /// Upper bound for a single simulation step, in seconds
    pub max_frame_time: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            max_frame_time: DEFAULT_MAX_FRAME_TIME,
        }
    }
}

/// # World Configuration
///
/// Fixed horizontal bounds of the broad phase and its structural limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Minimum corner of the world rectangle as `[x, z]`
    pub bounds_min: [f32; 2],
    /// Maximum corner of the world rectangle as `[x, z]`
    pub bounds_max: [f32; 2],
    /// Entries a quad-tree node holds before it splits
    pub split_threshold: usize,
    /// Depth below which nodes never split
    pub max_depth: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds_min: [-100.0, -150.0],
            bounds_max: [100.0, 50.0],
            split_threshold: 4,
            max_depth: 16,
        }
    }
}

impl WorldConfig {
    /// Minimum corner as a vector
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.bounds_min[0], self.bounds_min[1])
    }

    /// Maximum corner as a vector
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.bounds_max[0], self.bounds_max[1])
    }
}

/// # Ball Physics Configuration
///
/// Integration and contact response constants for the ball.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallPhysicsConfig {
    /// Downward acceleration in units per second squared
    pub gravity: f32,
    /// Air drag applied while rolling
    pub drag: f32,
    /// Rolling friction applied while rolling
    pub friction: f32,
    /// Restitution factor for floor-like contacts
    pub floor_restitution: f32,
    /// Restitution factor for walls and steep slopes
    pub wall_restitution: f32,
    /// Minimum normal Y for a contact to use the floor restitution
    pub floor_normal_y: f32,
    /// Minimum normal Y for a contact to ground the ball
    pub ground_normal_y: f32,
    /// Speed below which a grounded ball comes to rest
    pub stop_speed: f32,
    /// Absolute height beyond which the ball is put back on its checkpoint
    pub reset_height: f32,
}

impl Default for BallPhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            drag: 0.5,
            friction: 0.5,
            floor_restitution: 1.25,
            wall_restitution: 2.0,
            floor_normal_y: 0.9,
            ground_normal_y: 0.95,
            stop_speed: 0.3,
            reset_height: 10.0,
        }
    }
}

/// # Aim Configuration
///
/// Shot charging and aim pivot behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Highest launch speed a charged shot reaches
    pub max_power: f32,
    /// Power gained or lost per second while charging
    pub power_rate: f32,
    /// Aim rotation speed in radians per second
    pub look_speed: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]`
    pub pitch_limit: f32,
    /// Yaw the controller starts with
    pub initial_yaw: f32,
    /// Pitch the controller starts with
    pub initial_pitch: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            max_power: 10.0,
            power_rate: 12.0,
            look_speed: 1.5,
            pitch_limit: 1.5,
            initial_yaw: 1.5,
            initial_pitch: 1.0,
        }
    }
}

/// # Camera Rig Configuration
///
/// Placement of the orbit camera and the shot indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRigConfig {
    /// Distance between the orbit camera and the ball
    pub distance: f32,
    /// Offset of the power indicator along the aim direction
    pub power_indicator_offset: f32,
    /// Length of the power indicator at full power
    pub power_indicator_length: f32,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            distance: 3.0,
            power_indicator_offset: 0.15,
            power_indicator_length: 0.2,
        }
    }
}

/// # Ball Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Collision radius of the ball
    pub radius: f32,
    /// Physics constants
    pub physics: BallPhysicsConfig,
    /// Aiming constants
    pub aim: AimConfig,
    /// Camera rig constants
    pub camera: CameraRigConfig,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 0.06,
            physics: BallPhysicsConfig::default(),
            aim: AimConfig::default(),
            camera: CameraRigConfig::default(),
        }
    }
}

/// # Course Configuration
///
/// One hole: where the ball starts, where the cup is, and which collider
/// descriptor file describes its geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    /// Starting position of the ball
    pub tee: [f32; 3],
    /// Center of the goal volume
    pub goal: [f32; 3],
    /// Half extents of the axis-aligned goal volume
    #[serde(default = "CourseConfig::default_goal_half_extents")]
    pub goal_half_extents: [f32; 3],
    /// Collider descriptor file for this hole
    #[serde(default)]
    pub colliders: Option<String>,
}

impl CourseConfig {
    /// Create a course without a collider file
    pub fn new(tee: [f32; 3], goal: [f32; 3]) -> Self {
        Self {
            tee,
            goal,
            goal_half_extents: Self::default_goal_half_extents(),
            colliders: None,
        }
    }

    fn default_goal_half_extents() -> [f32; 3] {
        [0.15, 0.25, 0.15]
    }

    /// Tee as a vector
    pub fn tee_position(&self) -> Vec3 {
        Vec3::from(self.tee)
    }

    /// Goal center as a vector
    pub fn goal_position(&self) -> Vec3 {
        Vec3::from(self.goal)
    }
}

/// # Complete Game Configuration
///
/// Top-level configuration that encompasses all subsystems.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Collision world configuration
    pub world: WorldConfig,
    /// Ball configuration
    pub ball: BallConfig,
    /// Holes in play order
    pub courses: Vec<CourseConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            world: WorldConfig::default(),
            ball: BallConfig::default(),
            courses: default_courses(),
        }
    }
}

impl GameConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| Err(ConfigError::Invalid(message.to_string()));
        let positive = |value: f32| value > 0.0;

        if !positive(self.engine.max_frame_time) {
            return invalid("max_frame_time must be positive");
        }
        let (min, max) = (self.world.min(), self.world.max());
        if !(min.x < max.x && min.y < max.y) {
            return invalid("world bounds_min must be below bounds_max on both axes");
        }
        if self.world.split_threshold == 0 {
            return invalid("split_threshold must be at least 1");
        }
        if !positive(self.ball.radius) {
            return invalid("ball radius must be positive");
        }
        let physics = &self.ball.physics;
        if !(0.0..=1.0).contains(&physics.floor_normal_y) || !(0.0..=1.0).contains(&physics.ground_normal_y) {
            return invalid("normal thresholds must lie in [0, 1]");
        }
        if physics.ground_normal_y < physics.floor_normal_y {
            return invalid("ground_normal_y must be at least floor_normal_y");
        }
        if physics.stop_speed < 0.0 || physics.reset_height <= 0.0 {
            return invalid("stop_speed must be non-negative and reset_height positive");
        }
        if self.ball.aim.max_power < 0.0 {
            return invalid("max_power must be non-negative");
        }
        if self.courses.iter().any(|c| c.goal_half_extents.iter().any(|h| *h < 0.0)) {
            return invalid("goal half extents must be non-negative");
        }
        Ok(())
    }
}

impl Config for GameConfig {}

/// Tee and cup positions of the nine holes of the default course
fn default_courses() -> Vec<CourseConfig> {
    [
        ([0.0, 0.11, 0.0], [14.0, -0.5, 0.0]),
        ([14.0, 0.11, 6.0], [22.0, -0.5, 8.0]),
        ([28.0, 0.11, 6.0], [28.0, 1.5, -4.0]),
        ([34.0, 3.11, -8.0], [28.0, -0.5, -22.0]),
        ([26.0, 0.11, -28.0], [20.0, -0.5, -42.0]),
        ([16.0, 0.11, -49.0], [1.5, -0.5, -46.0]),
        ([-2.0, 0.11, -40.0], [-10.0, -0.5, -31.5]),
        ([-16.0, 0.11, -30.0], [-20.0, 0.0, -20.0]),
        ([-18.0, 0.11, -10.0], [10.5, -0.5, -24.0]),
    ]
    .into_iter()
    .map(|(tee, goal)| CourseConfig::new(tee, goal))
    .collect()
}
